//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::DocumentId;
use crate::domain::SessionToken;
use crate::domain::ports::{
    MockCompanyRecords, MockLoginService, MockUserRecords, TokenError, TokenIssuer,
};
use crate::inbound::http::state::HttpState;

/// Token issuer with a fixed verification outcome.
///
/// `accepting` verifies exactly one token string; `failing` rejects every
/// token with the given error. Issuing always returns `issued-<subject>`.
pub struct StubTokens {
    verdict: Verdict,
}

enum Verdict {
    Accept { token: String, subject: DocumentId },
    Reject(TokenError),
}

impl StubTokens {
    pub fn accepting(token: &str, subject: &str) -> Self {
        Self {
            verdict: Verdict::Accept {
                token: token.to_owned(),
                subject: DocumentId::new(subject),
            },
        }
    }

    pub fn failing(error: TokenError) -> Self {
        Self {
            verdict: Verdict::Reject(error),
        }
    }
}

impl TokenIssuer for StubTokens {
    fn issue(&self, subject: &DocumentId) -> Result<SessionToken, TokenError> {
        Ok(SessionToken::new(format!("issued-{subject}")))
    }

    fn verify(&self, token: &str) -> Result<DocumentId, TokenError> {
        match &self.verdict {
            Verdict::Accept { token: known, subject } if known == token => Ok(subject.clone()),
            Verdict::Accept { .. } => Err(TokenError::invalid()),
            Verdict::Reject(error) => Err(error.clone()),
        }
    }
}

/// Handler state whose record ports are unconfigured mocks.
///
/// Any unexpected call on them panics, which makes the test fail loudly.
pub fn state_with_tokens(tokens: Arc<dyn TokenIssuer>) -> HttpState {
    HttpState::new(
        Arc::new(MockLoginService::new()),
        Arc::new(MockUserRecords::new()),
        Arc::new(MockCompanyRecords::new()),
        tokens,
    )
}

/// Handler state built from configured mocks, with tokens that reject
/// everything.
pub fn state_with(
    login: MockLoginService,
    users: MockUserRecords,
    companies: MockCompanyRecords,
) -> HttpState {
    HttpState::new(
        Arc::new(login),
        Arc::new(users),
        Arc::new(companies),
        Arc::new(StubTokens::failing(TokenError::invalid())),
    )
}
