//! HTTP inbound adapter exposing REST endpoints.

pub mod bearer;
pub mod companies;
pub mod error;
pub mod message;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod users;

pub use error::ApiResult;
