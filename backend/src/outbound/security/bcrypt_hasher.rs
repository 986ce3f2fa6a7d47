//! bcrypt implementation of [`CredentialHasher`].

use crate::domain::PasswordHash;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Default work factor for new hashes.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Salted bcrypt hashing with a configurable cost.
///
/// # Examples
/// ```
/// use recordkeeper::domain::ports::CredentialHasher;
/// use recordkeeper::outbound::security::BcryptHasher;
///
/// let hasher = BcryptHasher::new(4);
/// let hash = hasher.hash("hunter2").expect("hash");
/// assert!(hasher.verify("hunter2", &hash));
/// assert!(!hasher.verify("hunter3", &hash));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError> {
        bcrypt::hash(plaintext, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| CredentialHashError::hashing(err.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool {
        bcrypt::verify(plaintext, hash.as_str()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    // Minimum cost keeps the suite fast.
    #[fixture]
    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[rstest]
    fn hash_is_salted_and_verifiable(hasher: BcryptHasher) {
        let first = hasher.hash("pw").expect("hash");
        let second = hasher.hash("pw").expect("hash");

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("$2"));
        assert!(hasher.verify("pw", &first));
        assert!(hasher.verify("pw", &second));
    }

    #[rstest]
    #[case::different("pw2")]
    #[case::empty("")]
    #[case::case_changed("PW")]
    fn other_passwords_do_not_verify(hasher: BcryptHasher, #[case] attempt: &str) {
        let hash = hasher.hash("pw").expect("hash");
        assert!(!hasher.verify(attempt, &hash));
    }

    #[rstest]
    #[case::plaintext("pw")]
    #[case::empty("")]
    #[case::truncated("$2b$04$abc")]
    fn malformed_hash_never_verifies(hasher: BcryptHasher, #[case] stored: &str) {
        assert!(!hasher.verify("pw", &PasswordHash::new(stored)));
    }

    #[rstest]
    fn out_of_range_cost_is_a_hashing_error() {
        let err = BcryptHasher::new(2).hash("pw").expect_err("cost below minimum");
        assert!(matches!(err, CredentialHashError::Hashing { .. }));
    }
}
