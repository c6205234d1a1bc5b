//! Bearer credential verification.
//!
//! Credentials are JWTs carrying an `email` claim. HS256 tokens are checked
//! against a shared secret; RS256 tokens against a PEM public key, which is how
//! identity-provider ID tokens are verified.

use anyhow::{Context, bail};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::AppError;

/// Verified caller identity. Trusted verbatim as mapping owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// JWT claims read from (and written to) bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    // `aud` may be a string or an array on the wire; the decoder validates it itself.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Service for authenticating requests via Bearer tokens.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates an authentication service from a key and validation rules.
    ///
    /// # Arguments
    ///
    /// - `decoding_key` - HMAC secret or RSA public key
    /// - `algorithm` - signature algorithm tokens must use
    /// - `issuer` - required `iss` claim, if any
    /// - `audience` - required `aud` claim, if any; `aud` is ignored otherwise
    pub fn new(
        decoding_key: DecodingKey,
        algorithm: Algorithm,
        issuer: Option<&str>,
        audience: Option<&str>,
    ) -> Self {
        let mut validation = Validation::new(algorithm);

        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Creates an HS256 service from a shared secret.
    pub fn from_secret(secret: &str) -> Self {
        Self::new(
            DecodingKey::from_secret(secret.as_bytes()),
            Algorithm::HS256,
            None,
            None,
        )
    }

    /// Builds the service from `AUTH_JWT_*` configuration.
    ///
    /// A public key takes precedence over a shared secret.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is configured or the PEM cannot be parsed.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (key, algorithm) = match (&config.jwt_public_key, &config.jwt_secret) {
            (Some(pem), _) => {
                let pem = pem.replace("\\n", "\n");
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .context("AUTH_JWT_PUBLIC_KEY is not a valid RSA public key")?;
                (key, Algorithm::RS256)
            }
            (None, Some(secret)) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            (None, None) => bail!("Either AUTH_JWT_SECRET or AUTH_JWT_PUBLIC_KEY must be set"),
        };

        Ok(Self::new(
            key,
            algorithm,
            config.jwt_issuer.as_deref(),
            config.jwt_audience.as_deref(),
        ))
    }

    /// Verifies a raw bearer token and extracts the caller's identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - The signature, expiry, issuer or audience check fails
    /// - The token carries no `email` claim
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AppError::unauthorized(
                "Unauthorized Access!",
                json!({ "reason": "Invalid or expired token" }),
            )
        })?;

        let email = data
            .claims
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized Access!",
                    json!({ "reason": "Token has no email claim" }),
                )
            })?;

        Ok(Identity { email })
    }
}

/// Signs an HS256 token for `email`, valid for `ttl`.
///
/// Used by the admin CLI to mint development credentials.
///
/// # Errors
///
/// Returns an error if signing fails.
pub fn issue_token(
    secret: &str,
    email: &str,
    ttl: Duration,
    issuer: Option<&str>,
    audience: Option<&str>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + ttl).timestamp().max(0) as u64;

    let claims = Claims {
        sub: Some(email.to_string()),
        email: Some(email.to_string()),
        exp,
        iss: issuer.map(str::to_string),
        aud: audience.map(str::to_string),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn test_verify_valid_token() {
        let service = AuthService::from_secret(SECRET);
        let token = issue_token(SECRET, "a@b.com", Duration::hours(1), None, None).unwrap();

        let identity = service.verify(&token).unwrap();

        assert_eq!(identity.email, "a@b.com");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let service = AuthService::from_secret(SECRET);
        let token =
            issue_token("another-secret", "a@b.com", Duration::hours(1), None, None).unwrap();

        let result = service.verify(&token);

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = AuthService::from_secret(SECRET);
        let token = issue_token(SECRET, "a@b.com", Duration::hours(-2), None, None).unwrap();

        let result = service.verify(&token);

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let service = AuthService::from_secret(SECRET);

        assert!(service.verify("not-a-jwt").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_verify_rejects_token_without_email() {
        let service = AuthService::from_secret(SECRET);
        let claims = Claims {
            sub: Some("user-1".to_string()),
            email: None,
            exp: (Utc::now() + Duration::hours(1)).timestamp() as u64,
            iss: None,
            aud: None,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = service.verify(&token);

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_verify_checks_issuer_and_audience() {
        let service = AuthService::new(
            DecodingKey::from_secret(SECRET.as_bytes()),
            Algorithm::HS256,
            Some("https://issuer.example.com"),
            Some("shortcode"),
        );

        let good = issue_token(
            SECRET,
            "a@b.com",
            Duration::hours(1),
            Some("https://issuer.example.com"),
            Some("shortcode"),
        )
        .unwrap();
        assert!(service.verify(&good).is_ok());

        let wrong_issuer = issue_token(
            SECRET,
            "a@b.com",
            Duration::hours(1),
            Some("https://evil.example.com"),
            Some("shortcode"),
        )
        .unwrap();
        assert!(service.verify(&wrong_issuer).is_err());

        let wrong_audience = issue_token(
            SECRET,
            "a@b.com",
            Duration::hours(1),
            Some("https://issuer.example.com"),
            Some("other-app"),
        )
        .unwrap();
        assert!(service.verify(&wrong_audience).is_err());
    }

    #[test]
    fn test_audience_ignored_when_not_configured() {
        let service = AuthService::from_secret(SECRET);
        let token = issue_token(
            SECRET,
            "a@b.com",
            Duration::hours(1),
            None,
            Some("any-audience"),
        )
        .unwrap();

        assert!(service.verify(&token).is_ok());
    }

    const RSA_PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/jwt_rs256_private.pem");
    const RSA_PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/jwt_rs256_public.pem");

    fn config_with_keys(public_key: Option<String>, secret: Option<&str>) -> Config {
        Config {
            storage_backend: StorageBackend::Memory,
            database_url: None,
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            client_domain: None,
            jwt_secret: secret.map(str::to_string),
            jwt_public_key: public_key,
            jwt_issuer: None,
            jwt_audience: None,
            db_max_connections: 1,
            db_connect_timeout: 1,
            db_idle_timeout: 1,
            db_max_lifetime: 1,
        }
    }

    fn rs256_token(email: &str) -> String {
        let claims = Claims {
            sub: Some(email.to_string()),
            email: Some(email.to_string()),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as u64,
            iss: None,
            aud: None,
        };

        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_from_config_public_key_with_escaped_newlines() {
        // Single-line env value: newlines arrive as literal `\n`.
        let escaped = RSA_PUBLIC_PEM.trim_end().replace('\n', "\\n");
        assert!(!escaped.contains('\n'));

        let service = AuthService::from_config(&config_with_keys(Some(escaped), None)).unwrap();

        let identity = service.verify(&rs256_token("a@b.com")).unwrap();
        assert_eq!(identity.email, "a@b.com");
    }

    #[test]
    fn test_from_config_public_key_with_real_newlines() {
        let service =
            AuthService::from_config(&config_with_keys(Some(RSA_PUBLIC_PEM.to_string()), None))
                .unwrap();

        assert!(service.verify(&rs256_token("a@b.com")).is_ok());
    }

    #[test]
    fn test_from_config_public_key_takes_precedence_over_secret() {
        let service = AuthService::from_config(&config_with_keys(
            Some(RSA_PUBLIC_PEM.to_string()),
            Some(SECRET),
        ))
        .unwrap();

        assert!(service.verify(&rs256_token("a@b.com")).is_ok());

        let hs256 = issue_token(SECRET, "a@b.com", Duration::hours(1), None, None).unwrap();
        assert!(service.verify(&hs256).is_err());
    }

    #[test]
    fn test_from_config_rejects_invalid_public_key() {
        let config = config_with_keys(
            Some("-----BEGIN PUBLIC KEY-----\\nnot a key\\n-----END PUBLIC KEY-----".to_string()),
            Some(SECRET),
        );

        assert!(AuthService::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_secret_only() {
        let service = AuthService::from_config(&config_with_keys(None, Some(SECRET))).unwrap();
        let token = issue_token(SECRET, "a@b.com", Duration::hours(1), None, None).unwrap();

        assert!(service.verify(&token).is_ok());
        assert!(service.verify(&rs256_token("a@b.com")).is_err());
    }

    #[test]
    fn test_from_config_requires_a_key() {
        assert!(AuthService::from_config(&config_with_keys(None, None)).is_err());
    }
}
