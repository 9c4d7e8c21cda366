use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::CurvePoint;
use crate::domain::entity::models::Entity;
use crate::domain::entity::ports::EntityRepository;

const COLUMNS: &str = "id, curve_id, term, value";

pub struct PostgresCurvePointRepository {
    pool: PgPool,
}

impl PostgresCurvePointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<CurvePoint> for PostgresCurvePointRepository {
    async fn find_all(&self) -> Result<Vec<CurvePoint>, EntityError> {
        sqlx::query_as::<_, CurvePoint>(&format!("SELECT {COLUMNS} FROM curvepoint ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn count(&self) -> Result<u64, EntityError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM curvepoint")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<CurvePoint>, EntityError> {
        sqlx::query_as::<_, CurvePoint>(&format!(
            "SELECT {COLUMNS} FROM curvepoint ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CurvePoint>, EntityError> {
        sqlx::query_as::<_, CurvePoint>(&format!("SELECT {COLUMNS} FROM curvepoint WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn insert(&self, mut entity: CurvePoint) -> Result<CurvePoint, EntityError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO curvepoint (curve_id, term, value) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(entity.curve_id)
        .bind(entity.term)
        .bind(entity.value)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        entity.set_id(id);
        Ok(entity)
    }

    async fn update(&self, entity: CurvePoint) -> Result<CurvePoint, EntityError> {
        let id = entity.id().ok_or_else(|| {
            EntityError::Database("update requires a record with an id".to_string())
        })?;

        let result = sqlx::query(
            "UPDATE curvepoint SET curve_id = $2, term = $3, value = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(entity.curve_id)
        .bind(entity.term)
        .bind(entity.value)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::NotFound {
                entity: CurvePoint::NAME,
                id,
            });
        }

        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        let result = sqlx::query("DELETE FROM curvepoint WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM curvepoint WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
