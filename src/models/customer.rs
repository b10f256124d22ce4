use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Customer entry for the invoice form's select.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerOption {
    pub id: Uuid,
    pub name: String,
}

/// Customer record as it appears in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// All customers ordered by name.
pub async fn find_all(pool: &PgPool) -> Result<Vec<CustomerOption>, sqlx::Error> {
    sqlx::query_as::<_, CustomerOption>("SELECT id, name FROM customers ORDER BY name ASC")
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await
}

/// Insert a customer unless one with the same id already exists.
pub async fn create(pool: &PgPool, new: &NewCustomer) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(new.id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.image_url)
    .execute(pool)
    .await?;
    Ok(())
}
