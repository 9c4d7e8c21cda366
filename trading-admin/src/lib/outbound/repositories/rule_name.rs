use async_trait::async_trait;
use sqlx::PgPool;

use super::db_error;
use crate::domain::entity::errors::EntityError;
use crate::domain::entity::models::Entity;
use crate::domain::entity::models::RuleName;
use crate::domain::entity::ports::EntityRepository;

const COLUMNS: &str = "id, name, description, json, template, sql_str, sql_part";

pub struct PostgresRuleNameRepository {
    pool: PgPool,
}

impl PostgresRuleNameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<RuleName> for PostgresRuleNameRepository {
    async fn find_all(&self) -> Result<Vec<RuleName>, EntityError> {
        sqlx::query_as::<_, RuleName>(&format!("SELECT {COLUMNS} FROM rulename ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn count(&self) -> Result<u64, EntityError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rulename")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }

    async fn find_slice(&self, limit: i64, offset: i64) -> Result<Vec<RuleName>, EntityError> {
        sqlx::query_as::<_, RuleName>(&format!(
            "SELECT {COLUMNS} FROM rulename ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RuleName>, EntityError> {
        sqlx::query_as::<_, RuleName>(&format!("SELECT {COLUMNS} FROM rulename WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn insert(&self, mut entity: RuleName) -> Result<RuleName, EntityError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO rulename (name, description, json, template, sql_str, sql_part)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(&entity.json)
        .bind(&entity.template)
        .bind(&entity.sql_str)
        .bind(&entity.sql_part)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        entity.set_id(id);
        Ok(entity)
    }

    async fn update(&self, entity: RuleName) -> Result<RuleName, EntityError> {
        let id = entity.id().ok_or_else(|| {
            EntityError::Database("update requires a record with an id".to_string())
        })?;

        let result = sqlx::query(
            r#"
            UPDATE rulename
            SET name = $2, description = $3, json = $4, template = $5, sql_str = $6, sql_part = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(&entity.json)
        .bind(&entity.template)
        .bind(&entity.sql_str)
        .bind(&entity.sql_part)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::NotFound {
                entity: RuleName::NAME,
                id,
            });
        }

        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<bool, EntityError> {
        let result = sqlx::query("DELETE FROM rulename WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, EntityError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rulename WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
