use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use carteira_core::portfolio::{AssetType, NewPosition};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{AddPositionResponse, PortfolioResponse, PositionDto};

pub async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<PortfolioResponse>> {
    let summary = state.portfolio_service.get_portfolio(&user.user_id)?;
    Ok(Json(PortfolioResponse::from(summary)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPositionRequest {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub quantity: Option<f64>,
    pub average_price: Option<f64>,
    pub current_price: Option<f64>,
    #[serde(rename = "type", default)]
    pub asset_type: Option<AssetType>,
}

pub async fn add_position(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<AddPositionRequest>,
) -> ApiResult<Json<AddPositionResponse>> {
    let (name, symbol, quantity, average_price, current_price) = match (
        payload.name,
        payload.symbol,
        payload.quantity,
        payload.average_price,
        payload.current_price,
    ) {
        (Some(name), Some(symbol), Some(quantity), Some(average), Some(current)) => {
            (name, symbol, quantity, average, current)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Todos os campos são obrigatórios".to_string(),
            ))
        }
    };

    let created = state
        .portfolio_service
        .add_position(
            &user.user_id,
            NewPosition {
                name,
                symbol,
                quantity,
                average_price,
                current_price,
                asset_type: payload.asset_type.unwrap_or_default(),
            },
        )
        .await?;

    Ok(Json(AddPositionResponse {
        message: "Item adicionado ao portfólio".to_string(),
        item: PositionDto::from_created(created),
    }))
}
