use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::cache::InvoiceListCache;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::invoice::{self, FormState, InvoiceForm};
use super::actions;
use super::helpers::{self, FormMode};

/// GET /dashboard/invoices/{id}/edit
pub async fn edit_form(
    pool: web::Data<PgPool>,
    session: Session,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let existing = invoice::find_edit_by_id(&pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;

    let values = InvoiceForm {
        customer_id: Some(existing.customer_id.to_string()),
        amount: Some(existing.amount_input()),
        status: Some(existing.status.clone()),
        csrf_token: String::new(),
    };
    helpers::render_form(&pool, &session, &config, &FormMode::Edit(id), &values, FormState::default())
        .await
}

/// POST /dashboard/invoices/{id}
pub async fn update(
    pool: web::Data<PgPool>,
    session: Session,
    config: web::Data<AppConfig>,
    cache: web::Data<InvoiceListCache>,
    path: web::Path<String>,
    form: web::Form<InvoiceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let outcome = actions::update_invoice(pool.get_ref(), cache.get_ref(), &id, &form).await;
    helpers::respond(outcome, &pool, &session, &config, &FormMode::Edit(id), &form).await
}
