//! Wiring of adapters into the services behind [`HttpState`].

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::DocumentStore;
use crate::domain::{CompanyService, UserService};
use crate::inbound::http::state::HttpState;
use crate::outbound::security::{BcryptHasher, JwtTokenService};

/// Build the handler state over `store`.
///
/// One [`UserService`] backs both the login and user ports. The token
/// service is shared between the login flow, which issues tokens, and the
/// bearer extractor, which verifies them.
pub fn build_http_state<S>(
    store: Arc<S>,
    hash_cost: u32,
    token_secret: &[u8],
    clock: Arc<dyn Clock>,
) -> HttpState
where
    S: DocumentStore + 'static,
{
    let tokens = Arc::new(JwtTokenService::new(token_secret, Arc::clone(&clock)));
    let users = Arc::new(UserService::new(
        Arc::clone(&store),
        Arc::new(BcryptHasher::new(hash_cost)),
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let companies = Arc::new(CompanyService::new(store, clock));
    HttpState::new(users.clone(), users, companies, tokens)
}
