//! Identity resolution
//!
//! Turns a bearer credential into a stored user.

use std::sync::Arc;

use thiserror::Error;

use crate::models::User;
use crate::repository::UserRepository;

use super::jwt::{generate_access_token, verify_token, JwtError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            JwtError::EncodingFailed(msg) => AuthError::TokenError(msg),
            JwtError::DecodingFailed(msg) | JwtError::InvalidToken(msg) => {
                AuthError::InvalidToken(msg)
            }
        }
    }
}

/// Verifies bearer tokens and resolves them to users
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    access_token_ttl: i64,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String, access_token_ttl: i64) -> Self {
        Self {
            users,
            jwt_secret,
            access_token_ttl,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Issue an access token for a stored user
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        Ok(generate_access_token(
            user,
            &self.jwt_secret,
            self.access_token_ttl,
        )?)
    }

    /// Verify the token and load its subject.
    /// The role comes from the stored user, not the claim.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = verify_token(token, &self.jwt_secret)?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        if claims.role() != Some(user.role) {
            tracing::debug!(
                user_id = %user.id,
                claimed = %claims.role,
                stored = %user.role.as_str(),
                "Token role differs from stored role"
            );
        }

        Ok(user)
    }
}
