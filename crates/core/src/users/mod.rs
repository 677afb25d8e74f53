//! Users module - identity records and registration/authentication services.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{CreateUser, NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
