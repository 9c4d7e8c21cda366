use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::BidList;
use crate::domain::entity::models::Entity;
use crate::domain::entity::ports::EntityRepository;

const COLUMNS: &str =
    "id, account, bid_type, bid_quantity, ask_quantity, bid, ask, benchmark, commentary";

pub struct PostgresBidListRepository {
    pool: PgPool,
}

impl PostgresBidListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<BidList> for PostgresBidListRepository {
    async fn find_all(&self) -> Result<Vec<BidList>, EntityError> {
        sqlx::query_as::<_, BidList>(&format!("SELECT {COLUMNS} FROM bidlist ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn count(&self) -> Result<u64, EntityError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bidlist")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<BidList>, EntityError> {
        sqlx::query_as::<_, BidList>(&format!(
            "SELECT {COLUMNS} FROM bidlist ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BidList>, EntityError> {
        sqlx::query_as::<_, BidList>(&format!("SELECT {COLUMNS} FROM bidlist WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn insert(&self, mut entity: BidList) -> Result<BidList, EntityError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO bidlist
                (account, bid_type, bid_quantity, ask_quantity, bid, ask, benchmark, commentary)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&entity.account)
        .bind(&entity.bid_type)
        .bind(entity.bid_quantity)
        .bind(entity.ask_quantity)
        .bind(entity.bid)
        .bind(entity.ask)
        .bind(&entity.benchmark)
        .bind(&entity.commentary)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        entity.set_id(id);
        Ok(entity)
    }

    async fn update(&self, entity: BidList) -> Result<BidList, EntityError> {
        let id = entity.id().ok_or_else(|| {
            EntityError::Database("update requires a record with an id".to_string())
        })?;

        let result = sqlx::query(
            r#"
            UPDATE bidlist
            SET account = $2, bid_type = $3, bid_quantity = $4, ask_quantity = $5,
                bid = $6, ask = $7, benchmark = $8, commentary = $9
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&entity.account)
        .bind(&entity.bid_type)
        .bind(entity.bid_quantity)
        .bind(entity.ask_quantity)
        .bind(entity.bid)
        .bind(entity.ask)
        .bind(&entity.benchmark)
        .bind(&entity.commentary)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::NotFound {
                entity: BidList::NAME,
                id,
            });
        }

        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        let result = sqlx::query("DELETE FROM bidlist WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bidlist WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
