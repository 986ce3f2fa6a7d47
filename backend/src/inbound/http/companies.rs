//! Company handlers.
//!
//! ```text
//! GET    /companies
//! POST   /companies          {"code":"ACME","name":"Acme Corporation"}
//! GET    /companies/{code}
//! PUT    /companies/{code}   {"industry":"Aerospace"}
//! DELETE /companies/{code}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{CompanyPatch, CompanyView, Document, NewCompany, RecordCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::message::MessageResponse;
use crate::inbound::http::schemas::{CompanyPayloadSchema, CompanySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// List every company.
#[utoipa::path(
    get,
    path = "/companies",
    responses(
        (status = 200, description = "Companies", body = [CompanySchema]),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "listCompanies",
    security([])
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CompanyView>>> {
    state.companies.list_companies().await.map(web::Json)
}

/// Create a company. Codes are not checked for uniqueness.
#[utoipa::path(
    post,
    path = "/companies",
    request_body = CompanyPayloadSchema,
    responses(
        (status = 201, description = "Created company", body = CompanySchema),
        (status = 500, description = "Creation failed", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "createCompany",
    security([])
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<HttpResponse> {
    let company = NewCompany::from_document(payload.into_inner());
    let created = state.companies.create_company(company).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Fetch a company by code.
#[utoipa::path(
    get,
    path = "/companies/{code}",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Company without `_id`", body = CompanySchema),
        (status = 404, description = "Company not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "getCompany",
    security([])
)]
#[get("/companies/{code}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    code: web::Path<String>,
) -> ApiResult<web::Json<CompanyView>> {
    let code = RecordCode::new(code.into_inner());
    state.companies.get_company(&code).await.map(web::Json)
}

/// Partially update a company. A request that changes nothing is a `404`.
#[utoipa::path(
    put,
    path = "/companies/{code}",
    params(("code" = String, Path, description = "Company code")),
    request_body = CompanyPayloadSchema,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 404, description = "Company not found or unchanged", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "updateCompany",
    security([])
)]
#[put("/companies/{code}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    code: web::Path<String>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<MessageResponse>> {
    let code = RecordCode::new(code.into_inner());
    let patch = CompanyPatch::from_document(payload.into_inner());
    state.companies.update_company(&code, patch).await?;
    Ok(web::Json(MessageResponse::new("Company updated successfully.")))
}

/// Delete a company unless users still reference its code.
#[utoipa::path(
    delete,
    path = "/companies/{code}",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 400, description = "Users still reference this company", body = ErrorSchema),
        (status = 404, description = "Company not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany",
    security([])
)]
#[delete("/companies/{code}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    code: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let code = RecordCode::new(code.into_inner());
    state.companies.delete_company(&code).await?;
    Ok(web::Json(MessageResponse::new("Company deleted successfully.")))
}

/// Register the company routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_companies)
        .service(create_company)
        .service(get_company)
        .service(update_company)
        .service(delete_company);
}
