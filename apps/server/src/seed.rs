//! Demo data: one user and a handful of B3 positions.

use carteira_core::portfolio::{AssetType, NewPosition};
use carteira_core::users::NewUser;

use crate::main_lib::AppState;

const SEED_EMAIL: &str = "joao@exemplo.com";

/// Populates the database with the demo user and portfolio. Running twice
/// is a no-op: the unique indexes reject the duplicates and we stop early.
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    let user = match state
        .user_service
        .register(NewUser {
            name: "João Silva".to_string(),
            email: SEED_EMAIL.to_string(),
            password: "123456".to_string(),
        })
        .await
    {
        Ok(user) => user,
        Err(e) if matches!(e, carteira_core::Error::ConstraintViolation(_)) => {
            tracing::info!("Seed user already present, skipping");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let positions = [
        ("Petrobras", "PETR4", 100.0, 25.50, 26.80),
        ("Vale", "VALE3", 80.0, 65.20, 64.50),
        ("Itaú Unibanco", "ITUB4", 120.0, 32.10, 32.80),
        ("Bradesco", "BBDC4", 150.0, 18.50, 18.80),
        ("Ambev", "ABEV3", 200.0, 12.30, 12.20),
    ];
    for (name, symbol, quantity, average_price, current_price) in positions {
        state
            .portfolio_service
            .add_position(
                &user.id,
                NewPosition {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    quantity,
                    average_price,
                    current_price,
                    asset_type: AssetType::Stock,
                },
            )
            .await?;
    }

    tracing::info!("Seeded demo user {SEED_EMAIL} with {} positions", positions.len());
    Ok(())
}
