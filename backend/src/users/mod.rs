//! Profile reads and updates for the calling user

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{UpdateProfileRequest, User};
use crate::repository::UserRepository;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("User not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        request.validate()?;

        let mut user = self.get_user(id).await?;
        request.apply_to(&mut user);
        let user = self.users.update(&user).await?;

        tracing::info!(user_id = %id, "Profile updated");
        Ok(user)
    }
}
