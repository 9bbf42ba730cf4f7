// Centralized configuration management for the token gate
// Load ALL env vars ONCE at startup

use once_cell::sync::OnceCell;
use std::env;
use thiserror::Error;

use crate::services::jwt::DEFAULT_TOKEN_EXPIRY;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Global application configuration loaded once at startup
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub cors_allowed_origins: Vec<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub environment: Environment,
    pub rust_log: String,
}

/// Environment type
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Token signing configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry: u64,
    pub key_version: u32,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("key_version", &self.key_version)
            .finish()
    }
}

/// Minimum secret length enforced in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest token lifetime accepted from `JWT_EXPIRY` (one year)
pub const MAX_TOKEN_EXPIRY: u64 = 365 * 24 * 60 * 60;

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| -> String { lookup(key).unwrap_or_else(|| default.to_string()) };

        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        // Parse bind address to extract port
        let bind_address = get_or_default("BIND_ADDRESS", "0.0.0.0:8080");
        let port: u16 = bind_address
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), "missing port".to_string())
            })?;

        let environment = Environment::from(get_or_default("ENVIRONMENT", "development"));
        let rust_log = get_or_default("RUST_LOG", "info");

        // Signing secret: absence or emptiness halts startup
        let secret = lookup("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingVar("JWT_SECRET".to_string()))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                "Secret must not be empty".to_string(),
            ));
        }
        if environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET".to_string(),
                format!(
                    "Secret must be at least {} characters long in production",
                    MIN_PRODUCTION_SECRET_LEN
                ),
            ));
        }

        let expiry = parse_u64_or_default("JWT_EXPIRY", &DEFAULT_TOKEN_EXPIRY.to_string())?;
        if expiry == 0 || expiry > MAX_TOKEN_EXPIRY {
            return Err(ConfigError::InvalidValue(
                "JWT_EXPIRY".to_string(),
                format!("must be between 1 and {} seconds", MAX_TOKEN_EXPIRY),
            ));
        }
        let key_version = parse_or_default("JWT_KEY_VERSION", "1")?;

        let cors_allowed_origins: Vec<String> = get_or_default("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(AppConfig {
            server: ServerConfig {
                bind_address,
                port,
                environment,
                rust_log,
            },
            jwt: JwtConfig {
                secret,
                expiry,
                key_version,
            },
            cors_allowed_origins,
        })
    }

    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}

/// Load the global configuration, or return the copy already loaded
///
/// The first successful call wins; later changes to the environment are not
/// observed for the rest of the process lifetime.
pub fn init_config() -> Result<&'static AppConfig, ConfigError> {
    CONFIG.get_or_try_init(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", "dev-secret")]).unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.jwt.expiry, 86_400);
        assert_eq!(config.jwt.key_version, 1);
        assert_eq!(config.cors_allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        assert_eq!(
            load(&[]).unwrap_err(),
            ConfigError::MissingVar("JWT_SECRET".to_string())
        );
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        assert!(matches!(
            load(&[("JWT_SECRET", "")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "JWT_SECRET"
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "   ")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "JWT_SECRET"
        ));
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        let result = load(&[("JWT_SECRET", "short"), ("ENVIRONMENT", "production")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue(key, _)) if key == "JWT_SECRET"));

        let long = "x".repeat(MIN_PRODUCTION_SECRET_LEN);
        assert!(load(&[("JWT_SECRET", &long), ("ENVIRONMENT", "prod")])
            .unwrap()
            .is_production());
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY", "soon")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "JWT_EXPIRY"
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY", "0")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "JWT_EXPIRY"
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("BIND_ADDRESS", "localhost")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "BIND_ADDRESS"
        ));
    }

    #[test]
    fn test_expiry_upper_bound() {
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY", "18446744073709551615")]),
            Err(ConfigError::InvalidValue(key, _)) if key == "JWT_EXPIRY"
        ));

        let too_long = (MAX_TOKEN_EXPIRY + 1).to_string();
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY", &too_long)]),
            Err(ConfigError::InvalidValue(key, _)) if key == "JWT_EXPIRY"
        ));

        let max = MAX_TOKEN_EXPIRY.to_string();
        assert_eq!(
            load(&[("JWT_SECRET", "s"), ("JWT_EXPIRY", &max)]).unwrap().jwt.expiry,
            MAX_TOKEN_EXPIRY
        );
    }

    #[test]
    fn test_cors_origins_split() {
        let config = load(&[
            ("JWT_SECRET", "s"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = load(&[("JWT_SECRET", "do-not-print-me")]).unwrap();
        assert!(!format!("{:?}", config).contains("do-not-print-me"));
    }
}
