// Token codec: HS256 bearer tokens carrying an identity claim
// Issuance and verification are pure functions of (claim/token, secret, clock)

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::models::auth::{IdentityClaim, TokenClaims};

/// Tokens live for 24 hours
pub const DEFAULT_TOKEN_EXPIRY: u64 = 24 * 60 * 60;

// Error types for token operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Invalid claim: {0}")]
    InvalidClaim(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("JWT encoding error: {0}")]
    EncodingError(String),

    #[error("Clock error: {0}")]
    Clock(String),

    #[error("Token expiry out of range: {0} seconds")]
    ExpiryOverflow(u64),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            // Malformed segments, bad base64/JSON and algorithm mismatches all
            // mean the token cannot be authenticated against our secret.
            _ => JwtError::InvalidSignature,
        }
    }
}

// Token configuration built from the process-wide signing secret
#[derive(Clone)]
pub struct JwtConfig {
    pub token_expiry: u64,    // 24 hours in seconds
    pub algorithm: Algorithm, // HS256 (HMAC SHA-256)

    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,

    // Stamped into the header as `kid`, never checked on verification
    pub key_version: u32,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry", &self.token_expiry)
            .field("algorithm", &self.algorithm)
            .field("encoding_key", &"<redacted>")
            .field("decoding_key", &"<redacted>")
            .field("key_version", &self.key_version)
            .finish()
    }
}

impl JwtConfig {
    /// Build config from a raw secret
    pub fn from_secret(secret: &str, token_expiry: u64, key_version: u32) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidKeyFormat(
                "signing secret must not be empty".to_string(),
            ));
        }

        Ok(JwtConfig {
            token_expiry,
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            key_version,
        })
    }

    /// Create config from centralized app configuration
    pub fn from_app_config(app_config: &crate::app_config::AppConfig) -> Result<Self, JwtError> {
        let crate::app_config::JwtConfig {
            secret,
            expiry,
            key_version,
        } = &app_config.jwt;

        Self::from_secret(secret, *expiry, *key_version)
    }
}

/// Issues and verifies bearer tokens
#[derive(Debug)]
pub struct JwtService {
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Create service from centralized app configuration
    pub fn from_app_config(app_config: &crate::app_config::AppConfig) -> Result<Self, JwtError> {
        let config = JwtConfig::from_app_config(app_config)?;
        Ok(Self::new(config))
    }

    pub fn token_expiry(&self) -> u64 {
        self.config.token_expiry
    }

    /// Issue a token for `claim` valid from now for the configured ttl
    pub fn issue(&self, claim: &IdentityClaim) -> Result<String, JwtError> {
        self.issue_at(claim, SystemTime::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// Output is deterministic for identical claim, secret and second.
    pub fn issue_at(&self, claim: &IdentityClaim, now: SystemTime) -> Result<String, JwtError> {
        if claim.id.is_empty() {
            return Err(JwtError::InvalidClaim("id must not be empty".to_string()));
        }
        if claim.username.is_empty() {
            return Err(JwtError::InvalidClaim(
                "username must not be empty".to_string(),
            ));
        }

        let claims = TokenClaims::new(claim, unix_seconds(now)?, self.config.token_expiry)
            .ok_or(JwtError::ExpiryOverflow(self.config.token_expiry))?;

        let mut header = Header::new(self.config.algorithm);
        header.kid = Some(self.config.key_version.to_string());

        encode(&header, &claims, &self.config.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verify a token against the current clock
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, JwtError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verifies a token and returns the embedded identity
    ///
    /// # Errors
    /// * `JwtError::InvalidSignature` - signature mismatch, tampering, rotated
    ///   secret, or a token that cannot be decoded at all
    /// * `JwtError::Expired` - signature is good but `exp` is not strictly
    ///   after `now`
    ///
    /// No leeway is applied. A verifier whose clock runs ahead of the issuer
    /// sees tokens expire early, and one running behind accepts them late.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<IdentityClaim, JwtError> {
        let token_data = decode::<TokenClaims>(token, &self.config.decoding_key, &self.validation())?;

        if token_data.claims.is_expired_at(unix_seconds(now)?) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims.into_identity())
    }

    // Signature and `exp` presence only; the expiry comparison is done against
    // the caller's clock in `verify_at`.
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.config.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation
    }
}

fn unix_seconds(now: SystemTime) -> Result<u64, JwtError> {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| JwtError::Clock(e.to_string()))
}
