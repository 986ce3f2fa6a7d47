//! HS256 JSON Web Tokens implementing [`TokenIssuer`].
//!
//! Claims are `{sub, exp}`. Expiry is checked against the injected clock
//! rather than the system time, so tests can move past it.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{DocumentId, SessionToken};

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared with the injected clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, subject: &DocumentId) -> Result<SessionToken, TokenError> {
        let expires_at = self.clock.utc() + Duration::hours(TOKEN_LIFETIME_HOURS);
        let claims = Claims {
            sub: subject.as_str().to_owned(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<DocumentId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(),
            }
        })?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::expired());
        }
        Ok(DocumentId::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    struct ShiftingClock(Mutex<DateTime<Utc>>);

    impl ShiftingClock {
        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for ShiftingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<ShiftingClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 10, 17, 8, 0, 0)
            .single()
            .expect("valid instant");
        Arc::new(ShiftingClock(Mutex::new(start)))
    }

    fn service(clock: &Arc<ShiftingClock>, secret: &[u8]) -> JwtTokenService {
        JwtTokenService::new(secret, Arc::clone(clock) as Arc<dyn Clock>)
    }

    #[rstest]
    fn issued_token_verifies_to_its_subject(clock: Arc<ShiftingClock>) {
        let tokens = service(&clock, SECRET);

        let token = tokens.issue(&DocumentId::new("u-1")).expect("issue");
        let subject = tokens.verify(token.as_str()).expect("verify");

        assert_eq!(subject, DocumentId::new("u-1"));
        assert_eq!(token.as_str().split('.').count(), 3);
    }

    #[rstest]
    fn token_is_valid_just_before_expiry(clock: Arc<ShiftingClock>) {
        let tokens = service(&clock, SECRET);
        let token = tokens.issue(&DocumentId::new("u-1")).expect("issue");

        clock.advance(Duration::hours(TOKEN_LIFETIME_HOURS) - Duration::seconds(1));

        assert!(tokens.verify(token.as_str()).is_ok());
    }

    #[rstest]
    #[case::at_expiry(Duration::hours(TOKEN_LIFETIME_HOURS))]
    #[case::day_later(Duration::hours(TOKEN_LIFETIME_HOURS * 2))]
    fn token_expires_after_lifetime(clock: Arc<ShiftingClock>, #[case] elapsed: Duration) {
        let tokens = service(&clock, SECRET);
        let token = tokens.issue(&DocumentId::new("u-1")).expect("issue");

        clock.advance(elapsed);

        assert_eq!(tokens.verify(token.as_str()), Err(TokenError::expired()));
    }

    #[rstest]
    fn token_signed_with_another_secret_is_invalid(clock: Arc<ShiftingClock>) {
        let token = service(&clock, b"another-secret-another-secret-!!")
            .issue(&DocumentId::new("u-1"))
            .expect("issue");

        let result = service(&clock, SECRET).verify(token.as_str());

        assert_eq!(result, Err(TokenError::invalid()));
    }

    #[rstest]
    #[case::garbage("not-a-token")]
    #[case::empty("")]
    #[case::wrong_segments("a.b")]
    fn malformed_tokens_are_invalid(clock: Arc<ShiftingClock>, #[case] token: &str) {
        assert_eq!(
            service(&clock, SECRET).verify(token),
            Err(TokenError::invalid())
        );
    }

    #[rstest]
    fn tampered_payload_is_invalid(clock: Arc<ShiftingClock>) {
        let tokens = service(&clock, SECRET);
        let token = tokens.issue(&DocumentId::new("u-1")).expect("issue");
        let forged = tokens.issue(&DocumentId::new("u-2")).expect("issue");

        let mut parts: Vec<&str> = token.as_str().split('.').collect();
        let forged_parts: Vec<&str> = forged.as_str().split('.').collect();
        parts[1] = forged_parts[1];

        assert_eq!(tokens.verify(&parts.join(".")), Err(TokenError::invalid()));
    }
}
