use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token does not belong to the requested user")]
    Forbidden,
}

/// Claims carried by access tokens issued by the core backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Validates HS256 access tokens issued by the core backend.
///
/// The matching service does not issue tokens itself; it only checks that the
/// caller is who the request claims to be. `required = false` disables the
/// check for local development.
#[derive(Clone)]
pub struct TokenVerifier {
    secret: String,
    required: bool,
}

impl TokenVerifier {
    pub fn new(secret: String, required: bool) -> Self {
        Self { secret, required }
    }

    /// Verify the Authorization header against the user id in the request.
    pub fn check(&self, auth_header: Option<&str>, user_id: &str) -> Result<(), AuthError> {
        if !self.required {
            return Ok(());
        }

        let token = auth_header
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        let claims = self.decode(token)?;

        if claims.sub != user_id {
            return Err(AuthError::Forbidden);
        }

        Ok(())
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}
