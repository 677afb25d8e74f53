mod model;
mod repository;

pub use model::{NewPositionDB, PositionDB};
pub use repository::PositionRepository;
