use sqlx::PgPool;
use uuid::Uuid;

use super::types::{NewUser, User};

/// Find user by email for authentication. Emails compare case-insensitively.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, password FROM users WHERE lower(email) = lower($1)",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

/// Create a user and return its id.
pub async fn create(pool: &PgPool, new: &NewUser) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(&new.name)
        .bind(new.email.trim())
        .bind(&new.password)
        .execute(pool)
        .await?;
    Ok(id)
}
