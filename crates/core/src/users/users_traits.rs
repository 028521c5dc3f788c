use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserProfileUpdate};
use async_trait::async_trait;

/// Trait for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    /// Looks a user up by email or username. Returns `None` when absent.
    fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    async fn update_profile(&self, user_id: String, update: UserProfileUpdate) -> Result<User>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    async fn update_profile(&self, user_id: &str, update: UserProfileUpdate) -> Result<User>;
}
