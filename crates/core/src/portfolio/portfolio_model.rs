//! Portfolio domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset class of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    #[default]
    Stock,
    Crypto,
    Bond,
    Fund,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Crypto => "crypto",
            AssetType::Bond => "bond",
            AssetType::Fund => "fund",
        }
    }
}

impl std::str::FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stock" => Ok(AssetType::Stock),
            "crypto" => Ok(AssetType::Crypto),
            "bond" => Ok(AssetType::Bond),
            "fund" => Ok(AssetType::Fund),
            other => Err(format!("unknown asset type: {other}")),
        }
    }
}

/// Domain model representing one portfolio line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Uppercase ticker, unique per user.
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub asset_type: AssetType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    /// Market value of the position: quantity × current price.
    pub fn total_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Return since acquisition, in percent of the average price.
    pub fn change_percent(&self) -> f64 {
        (self.current_price - self.average_price) / self.average_price * 100.0
    }
}

/// Input model for adding a position to a portfolio.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub name: String,
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    #[serde(default, rename = "type")]
    pub asset_type: AssetType,
}

/// A position enriched with its derived figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionWithAllocation {
    #[serde(flatten)]
    pub position: Position,
    pub total_value: f64,
    /// Return since acquisition, percent.
    pub change: f64,
    /// Share of the portfolio's total value, percent. Zero when the
    /// portfolio total is zero.
    pub allocation: f64,
}

/// Aggregated view over all of a user's positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub items: Vec<PositionWithAllocation>,
    pub total_value: f64,
}
