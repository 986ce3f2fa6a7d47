//! Credential hashing and bearer token adapters.

mod bcrypt_hasher;
mod jwt_token_service;

pub use bcrypt_hasher::{BcryptHasher, DEFAULT_HASH_COST};
pub use jwt_token_service::{JwtTokenService, TOKEN_LIFETIME_HOURS};
