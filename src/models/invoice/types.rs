use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoices shown per page in the list view.
pub const ITEMS_PER_PAGE: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
        }
    }

    /// Exact match only: form values are the lowercase discriminants.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

/// Raw create/edit form submission. Every field is optional here so that a
/// missing field surfaces as a validation message, not a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceForm {
    #[serde(rename = "customerId", default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

/// Form data that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFields {
    pub customer_id: String,
    /// Amount as entered, in major units.
    pub amount: f64,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}

/// Row to insert; id and date are generated server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    pub fn from_fields(fields: &InvoiceFields, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id: fields.customer_id.clone(),
            amount: fields.amount_cents,
            status: fields.status,
            date,
        }
    }
}

/// Field name → messages, serialised with the form's field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none() && self.amount.is_none() && self.status.is_none()
    }

    pub fn push(&mut self, field: InvoiceField, message: impl Into<String>) {
        let slot = match field {
            InvoiceField::CustomerId => &mut self.customer_id,
            InvoiceField::Amount => &mut self.amount,
            InvoiceField::Status => &mut self.status,
        };
        slot.get_or_insert_with(Vec::new).push(message.into());
    }

    pub fn customer_id_messages(&self) -> &[String] {
        self.customer_id.as_deref().unwrap_or(&[])
    }

    pub fn amount_messages(&self) -> &[String] {
        self.amount.as_deref().unwrap_or(&[])
    }

    pub fn status_messages(&self) -> &[String] {
        self.status.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceField {
    CustomerId,
    Amount,
    Status,
}

/// What a create/update action hands back for re-rendering the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
    pub message: Option<String>,
}

impl FormState {
    pub fn invalid(errors: FieldErrors, message: &str) -> Self {
        Self { errors, message: Some(message.to_string()) }
    }

    pub fn message(message: &str) -> Self {
        Self { errors: FieldErrors::default(), message: Some(message.to_string()) }
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Invoice row joined with its customer, for the list view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceListItem {
    pub id: Uuid,
    pub amount: i64,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl InvoiceListItem {
    pub fn amount_display(&self) -> String {
        format_currency(self.amount)
    }

    pub fn date_display(&self) -> String {
        format_date(self.date)
    }
}

/// Editable columns of one invoice, for pre-filling the edit form.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InvoiceEdit {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: String,
}

impl InvoiceEdit {
    /// Amount in major units as the form shows it, e.g. `49.99`.
    pub fn amount_input(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// One page of the (possibly filtered) invoice list.
#[derive(Debug, Clone)]
pub struct InvoicePage {
    pub invoices: Vec<InvoiceListItem>,
    pub query: String,
    pub page: i64,
    pub total_pages: i64,
}

/// `$1,234.56` from minor units.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", abs % 100)
}

/// `Oct 18, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(4999), "$49.99");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(123_456_789), "$1,234,567.89");
        assert_eq!(format_currency(100_000), "$1,000.00");
        assert_eq!(format_currency(-1050), "-$10.50");
    }

    #[test]
    fn date_uses_short_month() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        assert_eq!(format_date(d), "Oct 8, 2026");
    }

    #[test]
    fn list_item_formats_amount_and_date() {
        let item = InvoiceListItem {
            id: Uuid::nil(),
            amount: 123_450,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            status: "pending".into(),
            name: "Lee Robinson".into(),
            email: "lee@robinson.com".into(),
            image_url: "/customers/lee-robinson.png".into(),
        };
        assert_eq!(item.amount_display(), "$1,234.50");
        assert_eq!(item.date_display(), "Jan 2, 2024");
    }

    #[test]
    fn status_parse_is_exact() {
        assert_eq!(InvoiceStatus::parse("paid"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("pending"), Some(InvoiceStatus::Pending));
        assert_eq!(InvoiceStatus::parse("Paid"), None);
        assert_eq!(InvoiceStatus::parse("overdue"), None);
    }

    #[test]
    fn edit_amount_input_keeps_two_decimals() {
        let edit = InvoiceEdit {
            id: Uuid::nil(),
            customer_id: Uuid::nil(),
            amount: 4_500,
            status: "paid".into(),
        };
        assert_eq!(edit.amount_input(), "45.00");
    }

    #[test]
    fn form_state_serialises_with_form_field_names() {
        let mut errors = FieldErrors::default();
        errors.push(InvoiceField::CustomerId, "Please select a customer.");
        let state = FormState::invalid(errors, "Missing Fields. Failed to Create Invoice.");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "errors": { "customerId": ["Please select a customer."] },
                "message": "Missing Fields. Failed to Create Invoice."
            })
        );
    }
}
