use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::cache::{INVOICES_PATH, InvoiceListCache};
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::invoice::{self, InvoicePage};
use crate::templates_structs::{InvoiceListTemplate, PageContext};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub query: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> &str {
        self.query.as_deref().map(str::trim).unwrap_or("")
    }

    /// Requested page; anything unparsable or below 1 means page 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// Cache variant key for this query.
    pub fn variant(&self) -> String {
        page_href_query(self.search(), self.page())
    }
}

/// `query=...&page=N`, url-encoded.
fn page_href_query(search: &str, page: i64) -> String {
    let page = page.to_string();
    serde_urlencoded::to_string([("query", search), ("page", page.as_str())])
        .unwrap_or_else(|_| format!("page={page}"))
}

/// Fetch the list page through the route cache.
pub async fn load_page(
    pool: &PgPool,
    cache: &InvoiceListCache,
    query: &ListQuery,
) -> Result<Arc<InvoicePage>, AppError> {
    if let Some(hit) = cache.get(INVOICES_PATH, &query.variant()) {
        return Ok(hit);
    }

    let generation = cache.generation(INVOICES_PATH);
    let page = Arc::new(invoice::find_filtered(pool, query.search(), query.page()).await?);
    // Stored under the page actually served; out-of-range page numbers get no slot of their own
    let variant = page_href_query(&page.query, page.page);
    cache.put_if_fresh(INVOICES_PATH, &variant, generation, Arc::clone(&page));
    Ok(page)
}

pub async fn render_list(
    pool: &PgPool,
    session: &Session,
    config: &AppConfig,
    cache: &InvoiceListCache,
    query: &ListQuery,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, config)?;
    let page = load_page(pool, cache, query).await?;

    let prev_href = (page.page > 1)
        .then(|| format!("{INVOICES_PATH}?{}", page_href_query(&page.query, page.page - 1)));
    let next_href = (page.page < page.total_pages)
        .then(|| format!("{INVOICES_PATH}?{}", page_href_query(&page.query, page.page + 1)));

    render(InvoiceListTemplate { ctx, page, prev_href, next_href })
}

/// GET /dashboard/invoices
pub async fn list(
    pool: web::Data<PgPool>,
    session: Session,
    config: web::Data<AppConfig>,
    cache: web::Data<InvoiceListCache>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    render_list(&pool, &session, &config, &cache, &query).await
}
