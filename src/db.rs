use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::auth::password;
use crate::errors::AppError;
use crate::models::customer::{self, NewCustomer};
use crate::models::invoice::{self, InvoiceStatus, NewInvoice};
use crate::models::user::{self, NewUser};

const DEMO_SEED: &str = include_str!("../data/seed/demo.json");

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SeedPayload {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub customers: Vec<NewCustomer>,
    #[serde(default)]
    pub invoices: Vec<SeedInvoice>,
}

#[derive(Debug, Deserialize)]
pub struct SeedInvoice {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: String,
    pub date: String,
}

impl SeedInvoice {
    fn to_new_invoice(&self) -> Option<NewInvoice> {
        Some(NewInvoice {
            id: Uuid::new_v4(),
            customer_id: self.customer_id.to_string(),
            amount: self.amount,
            status: InvoiceStatus::parse(&self.status)?,
            date: NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?,
        })
    }
}

pub fn demo_payload() -> Result<SeedPayload, serde_json::Error> {
    serde_json::from_str(DEMO_SEED)
}

/// Seed demo customers, invoices and a sign-in user into an empty store.
/// Seed user passwords are stored hashed.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), AppError> {
    let existing = customer::count(pool).await?;
    if existing > 0 {
        log::info!("Database already seeded ({existing} customers), skipping demo seed");
        return Ok(());
    }

    let payload = demo_payload()?;

    if user::count(pool).await? == 0 {
        for u in &payload.users {
            let hashed = NewUser {
                name: u.name.clone(),
                email: u.email.clone(),
                password: password::hash_password(&u.password)?,
            };
            user::create(pool, &hashed).await?;
        }
    }

    for c in &payload.customers {
        customer::create(pool, c).await?;
    }

    let mut skipped = 0;
    for seed in &payload.invoices {
        match seed.to_new_invoice() {
            Some(new) => invoice::insert(pool, &new).await?,
            None => {
                log::warn!("Skipping malformed seed invoice {seed:?}");
                skipped += 1;
            }
        }
    }

    log::info!(
        "Demo seed complete: users={}, customers={}, invoices={}, skipped={}",
        payload.users.len(),
        payload.customers.len(),
        payload.invoices.len() - skipped,
        skipped
    );
    Ok(())
}
