//! Driven port for signing and validating bearer tokens.

use crate::domain::{DocumentId, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Token issuance and verification failures.
    pub enum TokenError {
        /// Bad signature or malformed payload.
        Invalid => "token is invalid",
        /// The expiry has passed.
        Expired => "token has expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues tokens asserting a subject identity and validates them later.
///
/// Validity is binary: a token is good until its expiry. There is no
/// revocation.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `subject`.
    fn issue(&self, subject: &DocumentId) -> Result<SessionToken, TokenError>;

    /// Check signature and expiry, returning the subject.
    fn verify(&self, token: &str) -> Result<DocumentId, TokenError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TokenError::invalid(), "token is invalid")]
    #[case(TokenError::expired(), "token has expired")]
    #[case(TokenError::signing("bad key"), "token signing failed: bad key")]
    fn token_errors_render_their_cause(#[case] error: TokenError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
