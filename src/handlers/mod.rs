use actix_web::web;

use crate::auth;
use crate::errors::see_other;

pub mod auth_handlers;
pub mod invoice_handlers;

/// Register every route. Everything under `/dashboard` requires a session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/logout", web::post().to(auth_handlers::logout))
        .route("/", web::get().to(|| async { see_other("/dashboard") }))
        // Protected routes
        .service(
            web::scope("/dashboard")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("", web::get().to(|| async { see_other("/dashboard/invoices") }))
                // /invoices/create must be registered before /invoices/{id}
                .route("/invoices", web::get().to(invoice_handlers::list))
                .route("/invoices/create", web::get().to(invoice_handlers::new_form))
                .route("/invoices", web::post().to(invoice_handlers::create))
                .route("/invoices/{id}/edit", web::get().to(invoice_handlers::edit_form))
                .route("/invoices/{id}", web::post().to(invoice_handlers::update))
                .route("/invoices/{id}/delete", web::post().to(invoice_handlers::delete)),
        );
}
