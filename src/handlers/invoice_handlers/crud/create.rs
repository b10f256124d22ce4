use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::cache::InvoiceListCache;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::invoice::{FormState, InvoiceForm};
use super::actions;
use super::helpers::{self, FormMode};

/// GET /dashboard/invoices/create
pub async fn new_form(
    pool: web::Data<PgPool>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    helpers::render_form(
        &pool,
        &session,
        &config,
        &FormMode::Create,
        &InvoiceForm::default(),
        FormState::default(),
    )
    .await
}

/// POST /dashboard/invoices
pub async fn create(
    pool: web::Data<PgPool>,
    session: Session,
    config: web::Data<AppConfig>,
    cache: web::Data<InvoiceListCache>,
    form: web::Form<InvoiceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let outcome = actions::create_invoice(pool.get_ref(), cache.get_ref(), &form).await;
    helpers::respond(outcome, &pool, &session, &config, &FormMode::Create, &form).await
}
