use sqlx::PgPool;

use super::types::*;

/// Insert one invoice row.
pub async fn insert(pool: &PgPool, new: &NewInvoice) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO invoices (id, customer_id, amount, status, date) \
         VALUES ($1, $2::uuid, $3, $4, $5)",
    )
    .bind(new.id)
    .bind(&new.customer_id)
    .bind(new.amount)
    .bind(new.status.as_str())
    .bind(new.date)
    .execute(pool)
    .await?;
    Ok(())
}

/// Update customer, amount and status of the invoice with `id`. Returns the
/// number of rows touched.
pub async fn update(pool: &PgPool, id: &str, fields: &InvoiceFields) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE invoices \
         SET customer_id = $1::uuid, amount = $2, status = $3 \
         WHERE id = $4::uuid",
    )
    .bind(&fields.customer_id)
    .bind(fields.amount_cents)
    .bind(fields.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1::uuid")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Load the editable columns of one invoice. Ids that are not UUIDs simply
/// find nothing.
pub async fn find_edit_by_id(pool: &PgPool, id: &str) -> Result<Option<InvoiceEdit>, sqlx::Error> {
    let Ok(id) = uuid::Uuid::parse_str(id) else {
        return Ok(None);
    };
    sqlx::query_as::<_, InvoiceEdit>(
        "SELECT id, customer_id, amount, status FROM invoices WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

const FILTER_CLAUSE: &str = "\
    customers.name ILIKE $1 OR \
    customers.email ILIKE $1 OR \
    invoices.amount::text ILIKE $1 OR \
    invoices.date::text ILIKE $1 OR \
    invoices.status ILIKE $1";

/// One page of invoices matching `query` (blank matches everything), newest
/// first.
pub async fn find_filtered(
    pool: &PgPool,
    query: &str,
    page: i64,
) -> Result<InvoicePage, sqlx::Error> {
    let pattern = format!("%{}%", query.trim());

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM invoices \
         JOIN customers ON invoices.customer_id = customers.id \
         WHERE {FILTER_CLAUSE}"
    ))
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let total_pages = ((total + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE).max(1);
    let page = page.clamp(1, total_pages);
    let offset = (page - 1) * ITEMS_PER_PAGE;

    let invoices = sqlx::query_as::<_, InvoiceListItem>(&format!(
        "SELECT invoices.id, invoices.amount, invoices.date, invoices.status, \
                customers.name, customers.email, customers.image_url \
         FROM invoices \
         JOIN customers ON invoices.customer_id = customers.id \
         WHERE {FILTER_CLAUSE} \
         ORDER BY invoices.date DESC, invoices.id \
         LIMIT $2 OFFSET $3"
    ))
    .bind(&pattern)
    .bind(ITEMS_PER_PAGE)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(InvoicePage {
        invoices,
        query: query.trim().to_string(),
        page,
        total_pages,
    })
}
