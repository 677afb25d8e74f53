//! Unit tests for the portfolio service.

use super::*;
use crate::errors::{DatabaseError, Error, Result};
use crate::portfolio::{
    AssetType, NewPosition, PortfolioServiceTrait, Position, PositionRepositoryTrait,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockPositionRepository {
    positions: RwLock<Vec<Position>>,
}

impl MockPositionRepository {
    fn count(&self) -> usize {
        self.positions.read().unwrap().len()
    }
}

#[async_trait]
impl PositionRepositoryTrait for MockPositionRepository {
    fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Position>> {
        Ok(self
            .positions
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_one(&self, user_id: &str, symbol: &str) -> Result<Option<Position>> {
        Ok(self
            .positions
            .read()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id && p.symbol == symbol)
            .cloned())
    }

    async fn insert(&self, user_id: &str, new_position: NewPosition) -> Result<Position> {
        let mut positions = self.positions.write().unwrap();
        if positions
            .iter()
            .any(|p| p.user_id == user_id && p.symbol == new_position.symbol)
        {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "UNIQUE constraint failed: positions.user_id, positions.symbol".to_string(),
            )));
        }
        let now = Utc::now();
        let position = Position {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_position.name,
            symbol: new_position.symbol,
            quantity: new_position.quantity,
            average_price: new_position.average_price,
            current_price: new_position.current_price,
            asset_type: new_position.asset_type,
            created_at: now,
            updated_at: now,
        };
        positions.push(position.clone());
        Ok(position)
    }
}

fn service() -> (PortfolioService, Arc<MockPositionRepository>) {
    let repo = Arc::new(MockPositionRepository::default());
    (PortfolioService::new(repo.clone()), repo)
}

fn petrobras() -> NewPosition {
    NewPosition {
        name: "Petrobras".to_string(),
        symbol: "PETR4".to_string(),
        quantity: 100.0,
        average_price: 25.50,
        current_price: 26.80,
        asset_type: AssetType::Stock,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn add_position_uppercases_symbol() {
    let (service, _) = service();
    let mut input = petrobras();
    input.symbol = "petr4".to_string();

    let created = service.add_position("user-1", input).await.unwrap();
    assert_eq!(created.symbol, "PETR4");
}

#[tokio::test]
async fn add_position_rejects_non_positive_numbers() {
    let (service, repo) = service();

    for (quantity, average, current) in [
        (0.0, 25.50, 26.80),
        (100.0, -1.0, 26.80),
        (100.0, 25.50, 0.0),
        (f64::NAN, 25.50, 26.80),
    ] {
        let input = NewPosition {
            quantity,
            average_price: average,
            current_price: current,
            ..petrobras()
        };
        let err = service.add_position("user-1", input).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "accepted {quantity}/{average}/{current}");
    }
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn duplicate_symbol_conflicts_and_keeps_single_record() {
    let (service, repo) = service();
    service.add_position("user-1", petrobras()).await.unwrap();

    let err = service
        .add_position("user-1", petrobras())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ConstraintViolation(_)));
    assert_eq!(err.to_string(), "Ativo já existe no portfólio");
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn same_symbol_for_another_user_is_allowed() {
    let (service, repo) = service();
    service.add_position("user-1", petrobras()).await.unwrap();
    service.add_position("user-2", petrobras()).await.unwrap();
    assert_eq!(repo.count(), 2);
}

#[tokio::test]
async fn get_portfolio_aggregates_user_positions() {
    let (service, _) = service();
    service.add_position("user-1", petrobras()).await.unwrap();
    service
        .add_position(
            "user-1",
            NewPosition {
                name: "Vale".to_string(),
                symbol: "VALE3".to_string(),
                quantity: 80.0,
                average_price: 65.20,
                current_price: 64.50,
                asset_type: AssetType::Stock,
            },
        )
        .await
        .unwrap();

    let summary = service.get_portfolio("user-1").unwrap();

    assert_eq!(summary.items.len(), 2);
    assert_eq!(summary.total_value, 100.0 * 26.80 + 80.0 * 64.50);
    let sum: f64 = summary.items.iter().map(|i| i.allocation).sum();
    assert!((sum - 100.0).abs() < 1e-6);
}
