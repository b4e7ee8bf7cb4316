//! Mobile pairing token verification.

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use super::credentials::Credentials;
use super::resolver::{AuthScheme, SchemeError};

/// Claims carried by a pairing token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies HS256 pairing tokens issued to the mobile client.
pub struct PairingJwtScheme {
    decoding_key: DecodingKey,
}

impl PairingJwtScheme {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[async_trait]
impl AuthScheme for PairingJwtScheme {
    fn name(&self) -> &'static str {
        "pairing-jwt"
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<String, SchemeError> {
        let token = credentials
            .bearer_token
            .as_deref()
            .ok_or(SchemeError::NotApplicable)?;

        let decoded = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    SchemeError::Rejected("pairing token expired".into())
                }
                _ => SchemeError::Rejected(format!("invalid pairing token: {}", e)),
            })?;

        Ok(decoded.claims.sub)
    }
}
