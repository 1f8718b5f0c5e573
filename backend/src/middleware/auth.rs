//! Authentication middleware
//!
//! Extractors for bearer-token verification and caller resolution.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{self, AuthService};
use crate::models::{User, UserRole};

/// Caller resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }
}

/// Error response for authentication failures
#[derive(Debug, Serialize)]
struct AuthError {
    #[serde(skip)]
    status: StatusCode,
    error: AuthErrorDetails,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetails {
    code: String,
    message: String,
}

impl AuthError {
    fn new(code: &str, message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: AuthErrorDetails {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    fn forbidden(message: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            ..Self::new("FORBIDDEN", message)
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Extractor for authenticated users
///
/// Verifies the JWT from the Authorization header and loads the user it
/// names. Missing, malformed or expired tokens and unknown users are all
/// rejected with 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("Hello, {}", user.0.name)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AuthError::new(
                        "MISSING_TOKEN",
                        "Authorization header with Bearer token required",
                    )
                    .into_response()
                })?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        let user = auth_service
            .authenticate(bearer.token())
            .await
            .map_err(|e| {
                let (code, message) = match e {
                    auth::AuthError::TokenExpired => ("TOKEN_EXPIRED", "Token has expired"),
                    auth::AuthError::UserNotFound => ("USER_NOT_FOUND", "User no longer exists"),
                    auth::AuthError::DatabaseError(ref err) => {
                        tracing::error!(error = %err, "User lookup failed during authentication");
                        ("INVALID_TOKEN", "Could not resolve user")
                    }
                    _ => ("INVALID_TOKEN", "Invalid token"),
                };
                AuthError::new(code, message).into_response()
            })?;

        Ok(AuthenticatedUser(user))
    }
}

/// Extractor that additionally requires the PROVIDER role
pub struct ProviderUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for ProviderUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.is_provider() {
            return Err(AuthError::forbidden("Provider access required").into_response());
        }

        Ok(ProviderUser(user))
    }
}
