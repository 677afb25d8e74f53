use crate::errors::Result;
use crate::portfolio::portfolio_model::{NewPosition, PortfolioSummary, Position};
use async_trait::async_trait;

/// Trait for position repository operations.
///
/// The (user_id, symbol) pair is unique; the storage layer enforces it with
/// a database constraint so concurrent inserts cannot both succeed.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    /// All positions for a user, in insertion order.
    fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Position>>;
    fn find_one(&self, user_id: &str, symbol: &str) -> Result<Option<Position>>;
    async fn insert(&self, user_id: &str, new_position: NewPosition) -> Result<Position>;
}

/// Trait for portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn get_portfolio(&self, user_id: &str) -> Result<PortfolioSummary>;
    async fn add_position(&self, user_id: &str, new_position: NewPosition) -> Result<Position>;
}
