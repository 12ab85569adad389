//! Photo repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use giftbox_core::error::{AppError, ErrorKind};
use giftbox_core::result::AppResult;
use giftbox_entity::photo::{CreatePhoto, Photo};

use crate::store::PhotoStore;

/// Repository for photo rows.
#[derive(Debug, Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PhotoRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Photo>> {
        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find photo", e))
    }

    async fn list_by_folder(&self, folder_id: Uuid) -> AppResult<Vec<Photo>> {
        sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE folder_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list photos", e))
    }

    async fn list_unfiled(&self, owner_id: Uuid) -> AppResult<Vec<Photo>> {
        sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE owner_id = $1 AND folder_id IS NULL \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list unfiled photos", e)
        })
    }

    async fn count_by_folder(&self, folder_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count photos", e))?;
        Ok(count as u64)
    }

    async fn create(&self, data: &CreatePhoto) -> AppResult<Photo> {
        sqlx::query_as::<_, Photo>(
            "INSERT INTO photos \
             (id, owner_id, folder_id, file_name, storage_path, mime_type, size_bytes, caption) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.id)
        .bind(data.owner_id)
        .bind(data.folder_id)
        .bind(&data.file_name)
        .bind(&data.storage_path)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.caption)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("photos_folder_id_fkey") =>
            {
                AppError::not_found("Folder not found")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create photo", e),
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete photo", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_folder(&self, folder_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM photos WHERE folder_id = $1")
            .bind(folder_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder photos", e)
            })?;
        Ok(result.rows_affected())
    }
}
