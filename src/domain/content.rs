// Public contest content: categories, themes, announcements.
// Plain records with no behavior; validation is length/emptiness only and
// happens at the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level idea category (e.g. "Toys from waste").
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// A theme under a category, the unit an idea is submitted against.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
}

/// A portal-wide announcement, newest first on the public listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}
