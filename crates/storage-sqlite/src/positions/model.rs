//! Database models for portfolio positions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use carteira_core::portfolio::{NewPosition, Position};

use crate::users::UserDB;

/// Database model for positions
#[derive(
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PositionDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub asset_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting a new position
///
/// Timestamps are set application-side with sub-second precision so that
/// insertion order survives bursts of inserts within the same second.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::positions)]
#[serde(rename_all = "camelCase")]
pub struct NewPositionDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub symbol: String,
    pub quantity: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub asset_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            symbol: db.symbol,
            quantity: db.quantity,
            average_price: db.average_price,
            current_price: db.current_price,
            // Rows are only written through NewPositionDB, whose asset_type
            // comes from AssetType::as_str, so this cannot fail in practice.
            asset_type: db.asset_type.parse().unwrap_or_default(),
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl NewPositionDB {
    pub fn from_domain(user_id: &str, domain: NewPosition) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: domain.name,
            symbol: domain.symbol,
            quantity: domain.quantity,
            average_price: domain.average_price,
            current_price: domain.current_price,
            asset_type: domain.asset_type.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
