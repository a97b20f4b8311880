use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::user_repository::{User, UserRepository};
use crate::domain::user::value_objects::Email;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    phone: Option<String>,
    institute: Option<String>,
    team_id: Option<Uuid>,
    is_admin: bool,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let email =
            Email::new(&r.email).map_err(|e| format!("Invalid email from database: {}", e))?;
        Ok(User {
            id: r.id,
            email,
            password_hash: r.password_hash,
            full_name: r.full_name,
            phone: r.phone,
            institute: r.institute,
            team_id: r.team_id,
            is_admin: r.is_admin,
        })
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, full_name, phone, institute, team_id, is_admin";

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, String> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, full_name, phone, institute, team_id, is_admin)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(&user.institute)
        .bind(user.team_id)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

        Ok(user.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find user by id: {}", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, String> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to find user by email: {}", e))?;

        row.map(User::try_from).transpose()
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: String,
        phone: String,
        institute: String,
    ) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2, phone = $3, institute = $4
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(phone)
        .bind(institute)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to update profile: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("User not found: {}", user_id));
        }

        Ok(())
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<User>, String> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE team_id = $1 ORDER BY full_name",
            USER_COLUMNS
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find users by team: {}", e))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<User>, String> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY full_name",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to list users: {}", e))?;

        rows.into_iter().map(User::try_from).collect()
    }
}
