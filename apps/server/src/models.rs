//! API wire models, mapped from the core domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use carteira_core::portfolio::{PortfolioSummary, Position, PositionWithAllocation};
use carteira_core::users::User;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserDto,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PositionDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub change: f64,
    pub allocation: f64,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PositionDto {
    /// A freshly created position has no allocation yet: its share of the
    /// portfolio is only meaningful on the aggregated read path.
    pub fn from_created(position: Position) -> Self {
        let total_value = position.total_value();
        let change = position.change_percent();
        Self::build(position, total_value, change, 0.0)
    }

    fn build(position: Position, total_value: f64, change: f64, allocation: f64) -> Self {
        Self {
            id: position.id,
            user_id: position.user_id,
            name: position.name,
            symbol: position.symbol,
            quantity: position.quantity,
            average_price: position.average_price,
            current_price: position.current_price,
            total_value,
            change,
            allocation,
            asset_type: position.asset_type.as_str().to_string(),
            created_at: position.created_at,
            updated_at: position.updated_at,
        }
    }
}

impl From<PositionWithAllocation> for PositionDto {
    fn from(item: PositionWithAllocation) -> Self {
        Self::build(item.position, item.total_value, item.change, item.allocation)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub portfolio: Vec<PositionDto>,
    pub total_value: f64,
    pub total_items: usize,
}

impl From<PortfolioSummary> for PortfolioResponse {
    fn from(summary: PortfolioSummary) -> Self {
        let total_items = summary.items.len();
        Self {
            portfolio: summary.items.into_iter().map(PositionDto::from).collect(),
            total_value: summary.total_value,
            total_items,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddPositionResponse {
    pub message: String,
    pub item: PositionDto,
}
