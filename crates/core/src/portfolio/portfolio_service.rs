//! Portfolio service - validation and aggregation over the position store.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::allocation::aggregate;
use crate::portfolio::portfolio_model::{NewPosition, PortfolioSummary, Position};
use crate::portfolio::portfolio_traits::{PortfolioServiceTrait, PositionRepositoryTrait};

pub struct PortfolioService {
    repository: Arc<dyn PositionRepositoryTrait>,
}

impl PortfolioService {
    pub fn new(repository: Arc<dyn PositionRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validate(new_position: &NewPosition) -> Result<()> {
        if new_position.name.trim().is_empty() || new_position.symbol.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "Todos os campos são obrigatórios".to_string(),
            )
            .into());
        }
        let numeric = [
            new_position.quantity,
            new_position.average_price,
            new_position.current_price,
        ];
        // !(v > 0) also rejects NaN
        if numeric.iter().any(|v| !(*v > 0.0)) {
            return Err(ValidationError::InvalidInput(
                "Valores devem ser maiores que zero".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn get_portfolio(&self, user_id: &str) -> Result<PortfolioSummary> {
        let positions = self.repository.find_all_by_user(user_id)?;
        Ok(aggregate(&positions))
    }

    async fn add_position(&self, user_id: &str, new_position: NewPosition) -> Result<Position> {
        Self::validate(&new_position)?;

        let normalized = NewPosition {
            name: new_position.name.trim().to_string(),
            symbol: new_position.symbol.trim().to_uppercase(),
            ..new_position
        };

        let created = self
            .repository
            .insert(user_id, normalized)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    Error::ConstraintViolation("Ativo já existe no portfólio".to_string())
                } else {
                    e
                }
            })?;

        debug!(
            "Added position {} ({}) for user {}",
            created.id, created.symbol, user_id
        );
        Ok(created)
    }
}
