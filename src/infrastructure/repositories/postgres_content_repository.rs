use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::content::{Announcement, Category, Theme};
use crate::domain::repositories::ContentRepository;

/// PostgreSQL implementation of ContentRepository
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    /// Creates a new PostgresContentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn list_announcements(&self) -> Result<Vec<Announcement>, String> {
        sqlx::query_as::<_, Announcement>(
            "SELECT id, title, body, posted_at FROM announcements ORDER BY posted_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list announcements: {}", e))
    }

    async fn create_announcement(&self, announcement: &Announcement) -> Result<(), String> {
        sqlx::query("INSERT INTO announcements (id, title, body, posted_at) VALUES ($1, $2, $3, $4)")
            .bind(announcement.id)
            .bind(&announcement.title)
            .bind(&announcement.body)
            .bind(announcement.posted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to create announcement: {}", e))?;
        Ok(())
    }

    async fn delete_announcement(&self, id: Uuid) -> Result<(), String> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete announcement: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Announcement not found: {}", id));
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, String> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| format!("Failed to list categories: {}", e))
    }

    async fn create_category(&self, category: &Category) -> Result<(), String> {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to create category: {}", e))?;
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), String> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete category: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Category not found: {}", id));
        }
        Ok(())
    }

    async fn list_themes(&self, category_id: Uuid) -> Result<Vec<Theme>, String> {
        sqlx::query_as::<_, Theme>(
            "SELECT id, category_id, name FROM themes WHERE category_id = $1 ORDER BY name",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list themes: {}", e))
    }

    async fn create_theme(&self, theme: &Theme) -> Result<(), String> {
        sqlx::query("INSERT INTO themes (id, category_id, name) VALUES ($1, $2, $3)")
            .bind(theme.id)
            .bind(theme.category_id)
            .bind(&theme.name)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to create theme: {}", e))?;
        Ok(())
    }

    async fn delete_theme(&self, id: Uuid) -> Result<(), String> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete theme: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("Theme not found: {}", id));
        }
        Ok(())
    }
}
