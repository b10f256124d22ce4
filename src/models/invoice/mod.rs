pub mod types;
pub mod queries;
pub mod store;
pub mod validate;

pub use types::*;
pub use queries::*;
pub use store::InvoiceStore;
pub use validate::validate_invoice_form;
