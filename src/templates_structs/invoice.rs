use askama::Template;
use std::sync::Arc;

use crate::models::invoice::{FormState, InvoicePage};
use super::PageContext;

#[derive(Template)]
#[template(path = "invoices/list.html")]
pub struct InvoiceListTemplate {
    pub ctx: PageContext,
    pub page: Arc<InvoicePage>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// One `<option>` of the customer select.
pub struct CustomerChoice {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// One status radio button.
pub struct StatusChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Template)]
#[template(path = "invoices/form.html")]
pub struct InvoiceFormTemplate {
    pub ctx: PageContext,
    pub form_title: String,
    pub form_action: String,
    pub submit_label: String,
    pub customers: Vec<CustomerChoice>,
    pub statuses: Vec<StatusChoice>,
    pub amount: String,
    pub state: FormState,
}
