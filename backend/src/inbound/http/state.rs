//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on domain ports and can be tested with mocks instead of a store.

use std::sync::Arc;

use crate::domain::ports::{CompanyRecords, LoginService, TokenIssuer, UserRecords};

/// Port implementations used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserRecords>,
    pub companies: Arc<dyn CompanyRecords>,
    /// Verifies bearer tokens on protected routes.
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        users: Arc<dyn UserRecords>,
        companies: Arc<dyn CompanyRecords>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            login,
            users,
            companies,
            tokens,
        }
    }
}
