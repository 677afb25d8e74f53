//! Portfolio module - positions, aggregation, and services.
//!
//! A position is one line item in a user's holdings. Derived figures
//! (total value, change percent, allocation percent) are computed on read
//! from the stored inputs so they cannot drift.

mod allocation;
mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;

pub use allocation::aggregate;
pub use portfolio_model::{
    AssetType, NewPosition, PortfolioSummary, Position, PositionWithAllocation,
};
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioServiceTrait, PositionRepositoryTrait};

#[cfg(test)]
mod portfolio_service_tests;
