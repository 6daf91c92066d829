//! Listener and pool settings loaded via OrthoConfig.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Server settings read from CLI flags and `USERS_API_*` variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Host or address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Idle connections the pool keeps open.
    pub pool_min_idle: Option<u32>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Maximum pooled connections, falling back to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Pool checkout timeout, falling back to 30 seconds.
    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS))
    }

    /// Idle connections to keep open; `None` lets the pool shrink to zero.
    pub fn pool_min_idle(&self) -> Option<u32> {
        self.pool_min_idle
    }

    /// Resolve host and port to the first matching socket address.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::other(format!("no address for host {}", self.host())))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "USERS_API_HOST",
        "USERS_API_PORT",
        "USERS_API_POOL_MAX_SIZE",
        "USERS_API_POOL_TIMEOUT_SECS",
        "USERS_API_POOL_MIN_IDLE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("users-api")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(settings.pool_timeout(), Duration::from_secs(30));
        assert_eq!(settings.pool_min_idle(), None);
        assert_eq!(
            settings.bind_addr().expect("resolvable"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_API_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_API_PORT", Some("9090".to_owned())),
            ("USERS_API_POOL_MAX_SIZE", Some("3".to_owned())),
            ("USERS_API_POOL_TIMEOUT_SECS", Some("5".to_owned())),
            ("USERS_API_POOL_MIN_IDLE", Some("2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("resolvable"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(settings.pool_max_size(), 3);
        assert_eq!(settings.pool_timeout(), Duration::from_secs(5));
        assert_eq!(settings.pool_min_idle(), Some(2));
    }
}
