//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration for one token family (access or refresh).
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Issuer claim
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Verification keys for both token families.
#[derive(Clone, Debug)]
pub struct TokenKeys {
    pub access: JwtConfig,
    pub refresh: JwtConfig,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(config.expiration_minutes);

        Self {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Sign a token for a user. Used by the session service that owns issuance.
pub fn create_token(user_id: &str, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user_id, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and issuer, and decode the claims
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Short client-safe description of a verification failure.
pub fn describe_error(error: &jsonwebtoken::errors::Error) -> &'static str {
    match error.kind() {
        ErrorKind::ExpiredSignature => "jwt expired",
        ErrorKind::InvalidSignature => "invalid signature",
        ErrorKind::InvalidIssuer => "jwt issuer invalid",
        ErrorKind::ImmatureSignature => "jwt not active",
        _ => "jwt malformed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiration_minutes: 15,
            issuer: "account-service".to_string(),
        }
    }

    #[test]
    fn create_and_verify_token() {
        let config = config("secret-a");
        let token = create_token("user-123", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.iss, "account-service");
    }

    #[test]
    fn garbage_token_is_malformed() {
        let err = verify_token("invalid-token", &config("secret-a")).unwrap_err();
        assert_eq!(describe_error(&err), "jwt malformed");
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let token = create_token("user-123", &config("secret-a")).unwrap();
        let err = verify_token(&token, &config("secret-b")).unwrap_err();
        assert_eq!(describe_error(&err), "invalid signature");
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let mut expired = config("secret-a");
        // beyond the default 60s leeway
        expired.expiration_minutes = -10;
        let token = create_token("user-123", &expired).unwrap();

        let err = verify_token(&token, &expired).unwrap_err();
        assert_eq!(describe_error(&err), "jwt expired");
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", config("top-secret"));
        assert!(!rendered.contains("top-secret"));
    }
}
