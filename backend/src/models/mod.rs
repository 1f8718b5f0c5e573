//! Shared data models for ServiceHub backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// User model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    /// Only meaningful for providers
    pub approved: bool,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_provider(&self) -> bool {
        matches!(self.role, UserRole::Provider)
    }
}

/// User roles
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Consumer,
    Provider,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Consumer => "CONSUMER",
            UserRole::Provider => "PROVIDER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CONSUMER" => Some(UserRole::Consumer),
            "PROVIDER" => Some(UserRole::Provider),
            _ => None,
        }
    }
}

/// Profile update request for `PUT /api/users/me`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 5, max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 20))]
    pub zip_code: Option<String>,
}

impl UpdateProfileRequest {
    /// Apply the supplied fields onto a user record
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if self.address.is_some() {
            user.address = self.address;
        }
        if self.city.is_some() {
            user.city = self.city;
        }
        if self.state.is_some() {
            user.state = self.state;
        }
        if self.zip_code.is_some() {
            user.zip_code = self.zip_code;
        }
        user.updated_at = Utc::now();
    }
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Plain acknowledgement payload
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
