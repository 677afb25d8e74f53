//! Pure portfolio aggregation.
//!
//! No side effects and no I/O: given the stored positions, compute the
//! portfolio total and each position's derived figures. Malformed numeric
//! input (NaN) propagates; validation happens before construction.

use super::portfolio_model::{PortfolioSummary, Position, PositionWithAllocation};

/// Aggregates positions into a portfolio summary.
///
/// `total_value` is the sum of each position's quantity × current price.
/// Each item's allocation is its share of that total in percent, or zero
/// when the total is zero, so an all-zero portfolio never divides by zero.
/// Input order is preserved.
pub fn aggregate(positions: &[Position]) -> PortfolioSummary {
    let total_value: f64 = positions.iter().map(Position::total_value).sum();

    let items = positions
        .iter()
        .map(|position| {
            let value = position.total_value();
            let allocation = if total_value > 0.0 {
                value / total_value * 100.0
            } else {
                0.0
            };
            PositionWithAllocation {
                position: position.clone(),
                total_value: value,
                change: position.change_percent(),
                allocation,
            }
        })
        .collect();

    PortfolioSummary { items, total_value }
}
