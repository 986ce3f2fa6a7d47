//! Server settings loaded through OrthoConfig.
//!
//! Values come from CLI flags, `REGISTRY_*` environment variables and an
//! optional configuration file, in OrthoConfig's usual precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::security::DEFAULT_HASH_COST;

/// Listener and hashing settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Address to bind. Defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// bcrypt work factor for new password hashes.
    pub hash_cost: Option<u32>,
}

impl ServerSettings {
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    #[must_use]
    pub fn hash_cost(&self) -> u32 {
        self.hash_cost.unwrap_or(DEFAULT_HASH_COST)
    }
}
