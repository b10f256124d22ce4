//! Shared test infrastructure for action-level tests.
//!
//! The invoice actions and the credentials provider are generic over their
//! store seams, so these tests run against in-memory implementations that
//! record every statement instead of a live PostgreSQL.
#![allow(dead_code)]

use std::sync::Mutex;

use invoicer::auth::password;
use invoicer::auth::provider::{LoginForm, UserDirectory};
use invoicer::models::invoice::{InvoiceFields, InvoiceForm, InvoiceStatus, InvoiceStore, NewInvoice};
use invoicer::models::user::User;
use uuid::Uuid;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const DEMO_EMAIL: &str = "user@nextmail.com";
pub const DEMO_PASSWORD: &str = "123456";

// ============================================================================
// INVOICE STORE
// ============================================================================

/// Statement issued against the in-memory store.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(NewInvoice),
    Update { id: String, fields: InvoiceFields },
    Delete { id: String },
}

/// Stored invoice row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: chrono::NaiveDate,
}

#[derive(Default)]
pub struct MemoryStore {
    pub rows: Mutex<Vec<Row>>,
    pub statements: Mutex<Vec<Statement>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every statement fails at the storage layer.
    pub fn failing() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self { rows: Mutex::new(rows), ..Self::default() }
    }

    pub fn rows(&self) -> Vec<Row> {
        self.rows.lock().unwrap().clone()
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    fn fail(&self) -> Result<(), sqlx::Error> {
        if self.fail_writes {
            Err(sqlx::Error::Protocol("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

impl InvoiceStore for MemoryStore {
    async fn insert_invoice(&self, new: &NewInvoice) -> Result<(), sqlx::Error> {
        self.statements.lock().unwrap().push(Statement::Insert(new.clone()));
        self.fail()?;
        self.rows.lock().unwrap().push(Row {
            id: new.id.to_string(),
            customer_id: new.customer_id.clone(),
            amount: new.amount,
            status: new.status,
            date: new.date,
        });
        Ok(())
    }

    async fn update_invoice(&self, id: &str, fields: &InvoiceFields) -> Result<u64, sqlx::Error> {
        self.statements.lock().unwrap().push(Statement::Update {
            id: id.to_string(),
            fields: fields.clone(),
        });
        self.fail()?;
        let mut rows = self.rows.lock().unwrap();
        let mut touched = 0;
        for row in rows.iter_mut().filter(|r| r.id == id) {
            row.customer_id = fields.customer_id.clone();
            row.amount = fields.amount_cents;
            row.status = fields.status;
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete_invoice(&self, id: &str) -> Result<u64, sqlx::Error> {
        self.statements.lock().unwrap().push(Statement::Delete { id: id.to_string() });
        self.fail()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }
}

pub fn row(customer_id: &str, amount: i64, status: InvoiceStatus, date: (i32, u32, u32)) -> Row {
    Row {
        id: Uuid::new_v4().to_string(),
        customer_id: customer_id.to_string(),
        amount,
        status,
        date: chrono::NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
    }
}

/// Decode an invoice form the way actix does from a urlencoded body.
pub fn invoice_form(body: &str) -> InvoiceForm {
    serde_urlencoded::from_str(body).expect("urlencoded invoice form")
}

// ============================================================================
// USER DIRECTORY
// ============================================================================

#[derive(Default)]
pub struct MemoryDirectory {
    users: Vec<User>,
    fail: bool,
    pub lookups: Mutex<Vec<String>>,
}

impl MemoryDirectory {
    /// Directory holding the demo account with a real argon2 hash.
    pub fn with_demo_user() -> Self {
        let hash = password::hash_password(DEMO_PASSWORD).expect("hash demo password");
        Self {
            users: vec![User {
                id: Uuid::new_v4(),
                name: "User".to_string(),
                email: DEMO_EMAIL.to_string(),
                password: hash,
            }],
            ..Self::default()
        }
    }

    /// Directory with one account whose stored hash is not a PHC string.
    pub fn with_corrupt_hash() -> Self {
        Self {
            users: vec![User {
                id: Uuid::new_v4(),
                name: "Broken".to_string(),
                email: DEMO_EMAIL.to_string(),
                password: "not-a-hash".to_string(),
            }],
            ..Self::default()
        }
    }

    /// Directory whose lookups fail at the storage layer.
    pub fn unavailable() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

impl UserDirectory for MemoryDirectory {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        self.lookups.lock().unwrap().push(email.to_string());
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

pub fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
        redirect_to: None,
        csrf_token: String::new(),
    }
}
