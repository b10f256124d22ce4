use sqlx::PgPool;

use super::queries;
use super::types::{InvoiceFields, NewInvoice};

/// The three statements the invoice actions issue. Implemented for `PgPool`;
/// the actions are generic over it so they can run against any store.
#[allow(async_fn_in_trait)]
pub trait InvoiceStore {
    async fn insert_invoice(&self, new: &NewInvoice) -> Result<(), sqlx::Error>;

    async fn update_invoice(&self, id: &str, fields: &InvoiceFields) -> Result<u64, sqlx::Error>;

    async fn delete_invoice(&self, id: &str) -> Result<u64, sqlx::Error>;
}

impl InvoiceStore for PgPool {
    async fn insert_invoice(&self, new: &NewInvoice) -> Result<(), sqlx::Error> {
        queries::insert(self, new).await
    }

    async fn update_invoice(&self, id: &str, fields: &InvoiceFields) -> Result<u64, sqlx::Error> {
        queries::update(self, id, fields).await
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64, sqlx::Error> {
        queries::delete(self, id).await
    }
}
