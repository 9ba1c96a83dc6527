// Bearer-token authentication against the hosted identity provider
//
// The platform never issues tokens. Users sign in with the external
// identity service; protected handlers validate the Bearer token it
// minted (HS256, shared secret) by extracting an `AuthUser`. Extraction
// fails closed with `AuthenticationRequired`.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::HubError;
use crate::handlers::AppState;

/// Claims carried by the identity provider's access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
}

/// The acting user for a request, taken from a validated token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    #[allow(dead_code)] // Present in the provider's claims; no endpoint surfaces it yet
    pub email: Option<String>,
}

/// Validates access tokens with the secret shared with the identity provider
#[derive(Clone)]
pub struct JwtVerifier {
    secret: String,
}

impl JwtVerifier {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Validate a token and extract its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, HubError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| HubError::AuthenticationRequired)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = HubError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .ok_or(HubError::AuthenticationRequired)?;

        let claims = state.jwt.validate_token(token)?;

        tracing::debug!("Authenticated request for user {}", claims.sub);

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(secret: &str, sub: &str, exp: usize) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            email: Some("user@example.com".to_string()),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_validate_round_trip() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        let token = make_token("test-secret", "user-1", far_future());

        let claims = verifier.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        assert!(verifier.validate_token("not.a.token").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        let token = make_token("other-secret", "user-1", far_future());
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        let token = make_token("test-secret", "user-1", expired);
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_without_email_claim() {
        #[derive(Serialize)]
        struct Minimal {
            sub: String,
            exp: usize,
        }

        let token = encode(
            &Header::default(),
            &Minimal {
                sub: "user-2".to_string(),
                exp: far_future(),
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let verifier = JwtVerifier::new("test-secret".to_string());
        let claims = verifier.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-2");
        assert!(claims.email.is_none());
    }
}
