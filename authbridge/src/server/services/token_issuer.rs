use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::common::AppTokenClaims;
use crate::server::config::TokenConfiguration;

const MAX_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Issues and verifies application session tokens.
///
/// Tokens are self-contained HS256 JWTs; nothing is recorded server-side, so
/// a token is valid exactly when its signature checks out and it has not expired.
pub struct TokenIssuer {
    secret: Option<String>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &TokenConfiguration) -> Self {
        let secret = config
            .signing_secret
            .clone()
            .filter(|secret| !secret.is_empty());

        if secret.is_none() {
            tracing::warn!("No signing secret configured, logins will fail");
        }

        Self {
            secret,
            ttl: Duration::seconds(config.ttl_seconds.min(MAX_TTL_SECONDS) as i64),
        }
    }

    /// Fails fast before any provider call would consume a single-use code
    pub fn ensure_configured(&self) -> Result<(), TokenError> {
        self.secret.as_ref().map(|_| ()).ok_or(TokenError::MissingSecret)
    }

    pub fn issue(&self, email: &str, name: &str) -> Result<String, TokenError> {
        self.issue_at(email, name, Utc::now())
    }

    pub fn issue_at(
        &self,
        email: &str,
        name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let secret = self.secret.as_ref().ok_or(TokenError::MissingSecret)?;

        let claims = AppTokenClaims {
            email: email.to_string(),
            name: name.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(TokenError::Signing)?;

        tracing::debug!(exp = claims.exp, "Issued app token");

        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<AppTokenClaims, TokenError> {
        let secret = self.secret.as_ref().ok_or(TokenError::MissingSecret)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<AppTokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(TokenError::Invalid)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: Option<&str>) -> TokenIssuer {
        TokenIssuer::new(&TokenConfiguration {
            signing_secret: secret.map(str::to_string),
            ttl_seconds: 24 * 60 * 60,
        })
    }

    #[test]
    fn test_issue_then_verify() {
        let issuer = issuer(Some("s3cr3t"));
        let now = Utc::now();

        let token = issuer.issue_at("a@b.com", "A B", now).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.name, "A B");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 86_400);
    }

    #[test]
    fn test_missing_secret() {
        let issuer = issuer(None);
        assert!(matches!(
            issuer.issue("a@b.com", "A B"),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_ensure_configured() {
        assert!(issuer(Some("s3cr3t")).ensure_configured().is_ok());
        assert!(matches!(
            issuer(None).ensure_configured(),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let issuer = issuer(Some(""));
        assert!(matches!(
            issuer.issue("a@b.com", "A B"),
            Err(TokenError::MissingSecret)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer(Some("s3cr3t"));
        let issued_at = Utc::now() - Duration::hours(24) - Duration::seconds(5);

        let token = issuer.issue_at("a@b.com", "A B", issued_at).unwrap();
        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_token_still_valid_before_expiry() {
        let issuer = issuer(Some("s3cr3t"));
        let issued_at = Utc::now() - Duration::hours(23);

        let token = issuer.issue_at("a@b.com", "A B", issued_at).unwrap();
        assert!(issuer.verify(&token).is_ok());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let token = issuer(Some("other")).issue("a@b.com", "A B").unwrap();
        assert!(matches!(
            issuer(Some("s3cr3t")).verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }
}
