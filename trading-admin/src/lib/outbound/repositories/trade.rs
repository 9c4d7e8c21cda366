use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Entity;
use crate::domain::entity::models::Trade;
use crate::domain::entity::ports::EntityRepository;

const COLUMNS: &str =
    "id, account, trade_type, buy_quantity, sell_quantity, buy_price, sell_price, trade_date";

pub struct PostgresTradeRepository {
    pool: PgPool,
}

impl PostgresTradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Trade> for PostgresTradeRepository {
    async fn find_all(&self) -> Result<Vec<Trade>, EntityError> {
        sqlx::query_as::<_, Trade>(&format!("SELECT {COLUMNS} FROM trade ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn count(&self) -> Result<u64, EntityError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trade")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<Trade>, EntityError> {
        sqlx::query_as::<_, Trade>(&format!(
            "SELECT {COLUMNS} FROM trade ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Trade>, EntityError> {
        sqlx::query_as::<_, Trade>(&format!("SELECT {COLUMNS} FROM trade WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn insert(&self, mut entity: Trade) -> Result<Trade, EntityError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO trade
                (account, trade_type, buy_quantity, sell_quantity, buy_price, sell_price, trade_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&entity.account)
        .bind(&entity.trade_type)
        .bind(entity.buy_quantity)
        .bind(entity.sell_quantity)
        .bind(entity.buy_price)
        .bind(entity.sell_price)
        .bind(entity.trade_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        entity.set_id(id);
        Ok(entity)
    }

    async fn update(&self, entity: Trade) -> Result<Trade, EntityError> {
        let id = entity.id().ok_or_else(|| {
            EntityError::Database("update requires a record with an id".to_string())
        })?;

        let result = sqlx::query(
            r#"
            UPDATE trade
            SET account = $2, trade_type = $3, buy_quantity = $4, sell_quantity = $5,
                buy_price = $6, sell_price = $7, trade_date = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&entity.account)
        .bind(&entity.trade_type)
        .bind(entity.buy_quantity)
        .bind(entity.sell_quantity)
        .bind(entity.buy_price)
        .bind(entity.sell_price)
        .bind(entity.trade_date)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::NotFound {
                entity: Trade::NAME,
                id,
            });
        }

        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        let result = sqlx::query("DELETE FROM trade WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM trade WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
