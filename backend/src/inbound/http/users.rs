//! User and login handlers.
//!
//! ```text
//! GET    /users
//! POST   /users          {"email":"ada@example.com","password":"s3cret","code":"ACME"}
//! POST   /login          {"email":"ada@example.com","password":"s3cret"}
//! GET    /users/byToken  Authorization: Bearer <token>
//! GET    /users/{code}
//! PUT    /users/{code}   {"name":"Ada"}
//! DELETE /users/{code}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::UserUpdateOutcome;
use crate::domain::{
    Document, Error, LoginCredentials, LoginValidationError, NewUser, RecordCode, UserPatch,
    UserValidationError, UserView,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::message::MessageResponse;
use crate::inbound::http::schemas::{
    ErrorSchema, LoginResponseSchema, UserPayloadSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /login`.
///
/// Both fields are optional at the wire level so that a missing email and a
/// missing password can be reported differently.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(format = Password)]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.email.as_deref(), value.password.as_deref())
    }
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    user: UserView,
}

const AUTHENTICATION_ERROR: &str = "Authentication error";

// A login without an email is just a failed login. One without a password
// key, or a body that does not decode at all, cannot be evaluated.
fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::MissingEmail => Error::invalid_credentials("Invalid credentials"),
        LoginValidationError::MissingPassword => Error::authentication_error(AUTHENTICATION_ERROR),
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::MissingEmail | UserValidationError::EmailNotText => "email",
        UserValidationError::PasswordNotText => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// List every user without passwords.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserView>>> {
    state.users.list_users().await.map(web::Json)
}

/// Create a user. The email must not already be registered.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayloadSchema,
    responses(
        (status = 201, description = "Created user", body = UserSchema),
        (status = 400, description = "Missing email or duplicate email", body = ErrorSchema),
        (status = 500, description = "Creation failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<HttpResponse> {
    let user = NewUser::try_from_document(payload.into_inner()).map_err(map_user_validation_error)?;
    let created = state.users.create_user(user).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Exchange email and password for a 24 hour bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token and user", body = LoginResponseSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Authentication error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: Result<web::Json<LoginRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let request = payload.map_err(|err| {
        debug!(error = %err, "unreadable login body");
        Error::authentication_error(AUTHENTICATION_ERROR)
    })?;
    let credentials =
        LoginCredentials::try_from(request.into_inner()).map_err(map_login_validation_error)?;
    let outcome = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: outcome.token.into_inner(),
        user: outcome.user,
    }))
}

/// Profile of the user the bearer token was issued for.
#[utoipa::path(
    get,
    path = "/users/byToken",
    responses(
        (status = 200, description = "Profile without `_id`", body = UserSchema),
        (status = 401, description = "Invalid or expired token", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserByToken",
    security(("BearerToken" = []))
)]
#[get("/users/byToken")]
pub async fn get_user_by_token(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserView>> {
    state.users.profile(user.id()).await.map(web::Json)
}

/// Fetch a user by code.
#[utoipa::path(
    get,
    path = "/users/{code}",
    params(("code" = String, Path, description = "User code")),
    responses(
        (status = 200, description = "User without `_id`", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{code}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    code: web::Path<String>,
) -> ApiResult<web::Json<UserView>> {
    let code = RecordCode::new(code.into_inner());
    state.users.get_user(&code).await.map(web::Json)
}

/// Partially update a user. A new password is re-hashed.
#[utoipa::path(
    put,
    path = "/users/{code}",
    params(("code" = String, Path, description = "User code")),
    request_body = UserPayloadSchema,
    responses(
        (status = 200, description = "Updated, or nothing to change", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security([])
)]
#[put("/users/{code}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    code: web::Path<String>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<MessageResponse>> {
    let code = RecordCode::new(code.into_inner());
    let patch =
        UserPatch::try_from_document(payload.into_inner()).map_err(map_user_validation_error)?;
    let message = match state.users.update_user(&code, patch).await? {
        UserUpdateOutcome::Modified => "User updated successfully",
        UserUpdateOutcome::Unchanged => "No modifications made",
    };
    Ok(web::Json(MessageResponse::new(message)))
}

/// Delete a user by code.
#[utoipa::path(
    delete,
    path = "/users/{code}",
    params(("code" = String, Path, description = "User code")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security([])
)]
#[delete("/users/{code}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    code: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let code = RecordCode::new(code.into_inner());
    state.users.delete_user(&code).await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}

/// Register the user routes. `/users/byToken` precedes `/users/{code}` so the
/// literal segment is not captured as a code.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(create_user)
        .service(login)
        .service(get_user_by_token)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
