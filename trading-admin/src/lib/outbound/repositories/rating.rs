use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Entity;
use crate::domain::entity::models::Rating;
use crate::domain::entity::ports::EntityRepository;

const COLUMNS: &str = "id, moodys_rating, sandp_rating, fitch_rating, order_number";

pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Rating> for PostgresRatingRepository {
    async fn find_all(&self) -> Result<Vec<Rating>, EntityError> {
        sqlx::query_as::<_, Rating>(&format!("SELECT {COLUMNS} FROM rating ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn count(&self) -> Result<u64, EntityError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rating")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<Rating>, EntityError> {
        sqlx::query_as::<_, Rating>(&format!(
            "SELECT {COLUMNS} FROM rating ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Rating>, EntityError> {
        sqlx::query_as::<_, Rating>(&format!("SELECT {COLUMNS} FROM rating WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn insert(&self, mut entity: Rating) -> Result<Rating, EntityError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO rating (moodys_rating, sandp_rating, fitch_rating, order_number)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&entity.moodys_rating)
        .bind(&entity.sandp_rating)
        .bind(&entity.fitch_rating)
        .bind(entity.order_number)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        entity.set_id(id);
        Ok(entity)
    }

    async fn update(&self, entity: Rating) -> Result<Rating, EntityError> {
        let id = entity.id().ok_or_else(|| {
            EntityError::Database("update requires a record with an id".to_string())
        })?;

        let result = sqlx::query(
            r#"
            UPDATE rating
            SET moodys_rating = $2, sandp_rating = $3, fitch_rating = $4, order_number = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&entity.moodys_rating)
        .bind(&entity.sandp_rating)
        .bind(&entity.fitch_rating)
        .bind(entity.order_number)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::NotFound {
                entity: Rating::NAME,
                id,
            });
        }

        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        let result = sqlx::query("DELETE FROM rating WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rating WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
