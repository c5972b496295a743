//! Application configuration loaded from environment.

use std::fmt;
use std::net::SocketAddr;

use chrono::Duration;

/// Shortest accepted JWT signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Access token lifetime used when `JWT_ACCESS_TOKEN_EXPIRES` is unset (15 minutes).
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 900;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// JWT signing secret (min 32 bytes). Required; there is no built-in default.
    pub jwt_secret: String,
    /// Lifetime of issued access tokens.
    pub access_token_ttl: Duration,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr(server_addr))?;

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigLoadError::MissingJwtSecret)?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigLoadError::JwtSecretTooShort(MIN_JWT_SECRET_LEN));
        }

        let access_token_ttl = match lookup("JWT_ACCESS_TOKEN_EXPIRES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => Duration::seconds(secs),
                _ => return Err(ConfigLoadError::InvalidAccessTokenTtl(raw)),
            },
            None => Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS),
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            server_addr,
            jwt_secret,
            access_token_ttl,
            log_level,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_addr", &self.server_addr)
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR: {0}")]
    InvalidServerAddr(String),

    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    #[error("Invalid JWT_ACCESS_TOKEN_EXPIRES (expected positive seconds): {0}")]
    InvalidAccessTokenTtl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigLoadError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.access_token_ttl, Duration::seconds(900));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn secret_is_required() {
        assert!(matches!(load(&[]), Err(ConfigLoadError::MissingJwtSecret)));
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(matches!(
            load(&[("JWT_SECRET", "your_secret_key")]),
            Err(ConfigLoadError::JwtSecretTooShort(32))
        ));
    }

    #[test]
    fn ttl_must_be_positive_seconds() {
        for bad in ["0", "-5", "soon"] {
            assert!(matches!(
                load(&[("JWT_SECRET", SECRET), ("JWT_ACCESS_TOKEN_EXPIRES", bad)]),
                Err(ConfigLoadError::InvalidAccessTokenTtl(_))
            ));
        }
        let config = load(&[("JWT_SECRET", SECRET), ("JWT_ACCESS_TOKEN_EXPIRES", "3600")]).unwrap();
        assert_eq!(config.access_token_ttl, Duration::hours(1));
    }

    #[test]
    fn invalid_server_addr_is_rejected() {
        assert!(matches!(
            load(&[("JWT_SECRET", SECRET), ("SERVER_ADDR", "localhost")]),
            Err(ConfigLoadError::InvalidServerAddr(_))
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        assert!(!format!("{:?}", config).contains(SECRET));
    }
}
