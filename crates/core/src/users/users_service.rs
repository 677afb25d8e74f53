//! Registration and authentication service.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result, ValidationError};
use crate::users::users_model::{CreateUser, NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Unexpected(format!("Password hashing failed: {e}")))
    }

    fn verify_password(password: &str, hash: &str) -> Result<()> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| Error::Credential(format!("invalid hash: {e}")))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| Error::Credential("Credenciais inválidas".to_string()))
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        if new_user.password.len() < MIN_PASSWORD_LEN {
            return Err(ValidationError::InvalidInput(
                "Senha deve ter pelo menos 6 caracteres".to_string(),
            )
            .into());
        }

        let password_hash = Self::hash_password(&new_user.password)?;
        let created = self
            .repository
            .insert(CreateUser {
                name: new_user.name.trim().to_string(),
                email: new_user.email.trim().to_lowercase(),
                password_hash,
                avatar: None,
            })
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    Error::ConstraintViolation("Email já está em uso".to_string())
                } else {
                    e
                }
            })?;

        debug!("Registered user {}", created.id);
        Ok(created)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .repository
            .find_by_email(&email.trim().to_lowercase())?
            .ok_or_else(|| Error::Credential("Credenciais inválidas".to_string()))?;
        Self::verify_password(password, &user.password_hash)?;
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.repository.find_by_id(user_id)
    }
}
