use crate::errors::Result;
use crate::users::users_model::{CreateUser, NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    async fn insert(&self, new_user: CreateUser) -> Result<User>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn authenticate(&self, email: &str, password: &str) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}
