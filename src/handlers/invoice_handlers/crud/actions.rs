//! Invoice mutations: validate → persist → revalidate → navigate.
//!
//! The actions know nothing about HTTP. They return an [`ActionOutcome`] and
//! leave it to the caller to turn that into a redirect or a re-rendered form.

use chrono::{NaiveDate, Utc};

use crate::cache::{INVOICES_PATH, RouteCache};
use crate::errors::AppError;
use crate::models::invoice::{
    FormState, InvoiceForm, InvoiceStore, NewInvoice, validate_invoice_form,
};

pub const CREATE_INVALID: &str = "Missing Fields. Failed to Create Invoice.";
pub const UPDATE_INVALID: &str = "Missing Fields. Failed to Update Invoice.";
pub const CREATE_STORE_FAILED: &str = "Database Error: Failed to Create Invoice.";
pub const UPDATE_STORE_FAILED: &str = "Database Error: Failed to Update Invoice.";

#[derive(Debug)]
pub enum ActionOutcome {
    /// Written and revalidated; navigate to the path.
    Redirect(String),
    /// Input rejected before touching the store.
    Invalid(FormState),
    /// Input was valid but the store rejected the statement. The list path
    /// has been revalidated regardless.
    StoreFailed { redirect_to: String, error: sqlx::Error },
}

impl ActionOutcome {
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect(path) => Some(path),
            ActionOutcome::StoreFailed { redirect_to, .. } => Some(redirect_to),
            ActionOutcome::Invalid(_) => None,
        }
    }
}

pub async fn create_invoice<S, V>(store: &S, cache: &RouteCache<V>, form: &InvoiceForm) -> ActionOutcome
where
    S: InvoiceStore,
    V: Clone,
{
    create_invoice_on(store, cache, form, Utc::now().date_naive()).await
}

/// `create_invoice` with an explicit creation date.
pub async fn create_invoice_on<S, V>(
    store: &S,
    cache: &RouteCache<V>,
    form: &InvoiceForm,
    today: NaiveDate,
) -> ActionOutcome
where
    S: InvoiceStore,
    V: Clone,
{
    let fields = match validate_invoice_form(form) {
        Ok(fields) => fields,
        Err(errors) => return ActionOutcome::Invalid(FormState::invalid(errors, CREATE_INVALID)),
    };

    let new = NewInvoice::from_fields(&fields, today);
    let result = store.insert_invoice(&new).await;
    if let Err(e) = &result {
        log::error!("Failed to create invoice for customer {}: {e}", new.customer_id);
    }

    finish(cache, result)
}

pub async fn update_invoice<S, V>(
    store: &S,
    cache: &RouteCache<V>,
    id: &str,
    form: &InvoiceForm,
) -> ActionOutcome
where
    S: InvoiceStore,
    V: Clone,
{
    let fields = match validate_invoice_form(form) {
        Ok(fields) => fields,
        Err(errors) => return ActionOutcome::Invalid(FormState::invalid(errors, UPDATE_INVALID)),
    };

    let result = store.update_invoice(id, &fields).await;
    match &result {
        Ok(0) => log::warn!("Update of invoice {id} matched no rows"),
        Ok(_) => {}
        Err(e) => log::error!("Failed to update invoice {id}: {e}"),
    }

    finish(cache, result.map(|_| ()))
}

/// Delete by id without validation. A store failure propagates and leaves the
/// cache untouched.
pub async fn delete_invoice<S, V>(store: &S, cache: &RouteCache<V>, id: &str) -> Result<(), AppError>
where
    S: InvoiceStore,
    V: Clone,
{
    store.delete_invoice(id).await?;
    cache.revalidate_path(INVOICES_PATH);
    Ok(())
}

fn finish<V: Clone>(cache: &RouteCache<V>, result: Result<(), sqlx::Error>) -> ActionOutcome {
    cache.revalidate_path(INVOICES_PATH);
    match result {
        Ok(()) => ActionOutcome::Redirect(INVOICES_PATH.to_string()),
        Err(error) => ActionOutcome::StoreFailed {
            redirect_to: INVOICES_PATH.to_string(),
            error,
        },
    }
}
