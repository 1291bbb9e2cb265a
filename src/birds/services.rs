use super::models::Bird;
use crate::common::{generate_bird_id, ApiError};
use crate::validation::{FieldValue, Lookup, LookupError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Fresh ids tried before a create gives up on id collisions
const MAX_ID_ATTEMPTS: usize = 5;

pub struct BirdsService {
    db: SqlitePool,
}

impl BirdsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    // ============================================================================
    // Bird CRUD Operations
    // ============================================================================

    /// Get all birds
    pub async fn get_all_birds(&self) -> Result<Vec<Bird>, ApiError> {
        let birds = sqlx::query_as::<_, Bird>(
            r#"
            SELECT id, name, species, wingspan_cm, created_at, updated_at
            FROM birds
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(birds)
    }

    /// Find a bird by ID; `None` when no such bird is stored
    pub async fn find_by_id(&self, bird_id: &str) -> Result<Option<Bird>, ApiError> {
        let bird = sqlx::query_as::<_, Bird>(
            r#"
            SELECT id, name, species, wingspan_cm, created_at, updated_at
            FROM birds
            WHERE id = ?
            "#,
        )
        .bind(bird_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(bird)
    }

    /// Insert a validated candidate and return the stored row.
    ///
    /// A generated id that is already stored is replaced with a fresh one.
    pub async fn insert_bird(&self, bird: &Bird) -> Result<Bird, ApiError> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut bird_id = bird.id.clone();

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let result = sqlx::query(
                r#"
                INSERT INTO birds (id, name, species, wingspan_cm, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&bird_id)
            .bind(&bird.name)
            .bind(&bird.species)
            .bind(bird.wingspan_cm)
            .bind(&now)
            .bind(&now)
            .execute(&self.db)
            .await;

            match result {
                Ok(_) => {
                    info!(bird_id = %bird_id, "Created bird");
                    return self.stored(&bird_id).await;
                }
                Err(e) if is_id_collision(&e) => {
                    warn!(bird_id = %bird_id, attempt, "Bird id already taken, regenerating");
                    bird_id = generate_bird_id();
                }
                Err(e) => return Err(map_write_error(e)),
            }
        }

        Err(ApiError::InternalServer(format!(
            "No free bird id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Persist a validated update and return the stored row
    pub async fn update_bird(&self, bird: &Bird) -> Result<Bird, ApiError> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            UPDATE birds
            SET name = ?, species = ?, wingspan_cm = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&bird.name)
        .bind(&bird.species)
        .bind(bird.wingspan_cm)
        .bind(&now)
        .bind(&bird.id)
        .execute(&self.db)
        .await
        .map_err(map_write_error)?;

        info!(bird_id = %bird.id, "Updated bird");

        self.stored(&bird.id).await
    }

    /// Delete a bird; returns false when nothing was deleted
    pub async fn delete_bird(&self, bird_id: &str) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM birds WHERE id = ?")
            .bind(bird_id)
            .execute(&self.db)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(bird_id = %bird_id, "Deleted bird");
        }
        Ok(deleted)
    }

    async fn stored(&self, bird_id: &str) -> Result<Bird, ApiError> {
        self.find_by_id(bird_id).await?.ok_or_else(|| {
            ApiError::InternalServer(format!("Bird {} missing after write", bird_id))
        })
    }
}

/// The primary key, not the name index, rejected the write
fn is_id_collision(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.message().contains("birds.id")
        }
        _ => false,
    }
}

/// A name index hit at write time is a late conflict, not a validation error
fn map_write_error(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() && db_err.message().contains("birds.name") {
            warn!(error = %db_err, "Unique constraint rejected bird write");
            return ApiError::Conflict("Bird name already exists".to_string());
        }
    }
    ApiError::DatabaseError(e)
}

#[async_trait]
impl Lookup for BirdsService {
    async fn value_taken(
        &self,
        field: &str,
        value: &FieldValue,
        exclude_id: Option<&str>,
    ) -> Result<bool, LookupError> {
        // Column names come from this whitelist, never from input
        let column = match field {
            "name" => "name",
            "species" => "species",
            other => return Err(LookupError::UnsupportedField(other.to_string())),
        };
        let Some(text) = value.as_text() else {
            return Ok(false);
        };

        let sql = format!(
            "SELECT COUNT(*) FROM birds WHERE {} = ? AND (? IS NULL OR id <> ?)",
            column
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(text)
            .bind(exclude_id)
            .bind(exclude_id)
            .fetch_one(&self.db)
            .await?;

        Ok(count > 0)
    }
}
