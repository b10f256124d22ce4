use super::types::{FieldErrors, InvoiceField, InvoiceFields, InvoiceForm, InvoiceStatus};

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_INVALID: &str = "Please enter a valid amount.";
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const AMOUNT_TOO_LARGE: &str = "Amount is too large.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Customer id must be present and not blank. Whether it references a real
/// customer is left to the store's foreign key.
pub fn validate_customer_id(value: Option<&str>) -> Result<String, String> {
    match value.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(CUSTOMER_REQUIRED.to_string()),
    }
}

/// Coerce the amount to a number (blank counts as 0) and require it to be
/// strictly positive. Returns `(amount, amount_in_cents)`.
pub fn validate_amount(value: Option<&str>) -> Result<(f64, i64), String> {
    let raw = value.map(str::trim).unwrap_or("");
    let amount = if raw.is_empty() {
        0.0
    } else {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return Err(AMOUNT_INVALID.to_string()),
        }
    };

    if amount <= 0.0 {
        return Err(AMOUNT_NOT_POSITIVE.to_string());
    }

    let cents = (amount * 100.0).round();
    if cents >= i64::MAX as f64 {
        return Err(AMOUNT_TOO_LARGE.to_string());
    }
    // Amounts under half a cent round to zero and cannot be stored.
    if cents < 1.0 {
        return Err(AMOUNT_NOT_POSITIVE.to_string());
    }
    Ok((amount, cents as i64))
}

pub fn validate_status(value: Option<&str>) -> Result<InvoiceStatus, String> {
    value
        .and_then(InvoiceStatus::parse)
        .ok_or_else(|| STATUS_REQUIRED.to_string())
}

/// Validate all three fields, collecting a message for every failing one.
pub fn validate_invoice_form(form: &InvoiceForm) -> Result<InvoiceFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = validate_customer_id(form.customer_id.as_deref())
        .map_err(|e| errors.push(InvoiceField::CustomerId, e))
        .ok();
    let amount = validate_amount(form.amount.as_deref())
        .map_err(|e| errors.push(InvoiceField::Amount, e))
        .ok();
    let status = validate_status(form.status.as_deref())
        .map_err(|e| errors.push(InvoiceField::Status, e))
        .ok();

    match (customer_id, amount, status) {
        (Some(customer_id), Some((amount, amount_cents)), Some(status)) => Ok(InvoiceFields {
            customer_id,
            amount,
            amount_cents,
            status,
        }),
        _ => Err(errors),
    }
}
