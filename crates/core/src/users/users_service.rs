use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, User, UserProfileUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    /// Registers a new user, rejecting duplicate email or username up front.
    ///
    /// The unique indexes on the users table are the real guard; this check
    /// exists to produce a readable message instead of a raw constraint error.
    async fn register(&self, new_user: NewUser) -> Result<User> {
        debug!("Registering user {}", new_user.username);
        if self.repository.find_by_identifier(&new_user.email)?.is_some() {
            return Err(Error::ConstraintViolation(
                "email is already in use".to_string(),
            ));
        }
        if self
            .repository
            .find_by_identifier(&new_user.username)?
            .is_some()
        {
            return Err(Error::ConstraintViolation(
                "username is already in use".to_string(),
            ));
        }
        self.repository.insert(new_user).await
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        self.repository.find_by_identifier(identifier)
    }

    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User> {
        if update.is_empty() {
            return Err(ValidationError::InvalidInput(
                "no profile fields to update".to_string(),
            )
            .into());
        }
        self.repository
            .update_profile(user_id.to_string(), update)
            .await
    }
}
