use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::{Announcement, Category, Theme};

/// Repository trait for public contest content
///
/// Reads are public; writes are reached only through the admin handlers.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn list_announcements(&self) -> Result<Vec<Announcement>, String>;
    async fn create_announcement(&self, announcement: &Announcement) -> Result<(), String>;
    async fn delete_announcement(&self, id: Uuid) -> Result<(), String>;

    async fn list_categories(&self) -> Result<Vec<Category>, String>;
    async fn create_category(&self, category: &Category) -> Result<(), String>;
    async fn delete_category(&self, id: Uuid) -> Result<(), String>;

    async fn list_themes(&self, category_id: Uuid) -> Result<Vec<Theme>, String>;
    async fn create_theme(&self, theme: &Theme) -> Result<(), String>;
    async fn delete_theme(&self, id: Uuid) -> Result<(), String>;
}
