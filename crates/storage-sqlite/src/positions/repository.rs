use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use carteira_core::portfolio::{NewPosition, Position, PositionRepositoryTrait};
use carteira_core::Result;

use super::model::{NewPositionDB, PositionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::positions;

pub struct PositionRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl PositionRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        PositionRepository { pool, writer }
    }
}

#[async_trait]
impl PositionRepositoryTrait for PositionRepository {
    fn find_all_by_user(&self, user_id: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;
        // Insertion order, not sorted by value.
        let rows = positions::table
            .filter(positions::user_id.eq(user_id))
            .order((positions::created_at.asc(), positions::id.asc()))
            .load::<PositionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Position::from).collect())
    }

    fn find_one(&self, user_id: &str, symbol: &str) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let row = positions::table
            .filter(positions::user_id.eq(user_id))
            .filter(positions::symbol.eq(symbol))
            .first::<PositionDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Position::from))
    }

    async fn insert(&self, user_id: &str, new_position: NewPosition) -> Result<Position> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Position> {
                let new_db = NewPositionDB::from_domain(&user_id, new_position);
                let result_db = diesel::insert_into(positions::table)
                    .values(&new_db)
                    .returning(PositionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Position::from(result_db))
            })
            .await
    }
}
