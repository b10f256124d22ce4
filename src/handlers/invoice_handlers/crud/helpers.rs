use actix_session::Session;
use actix_web::HttpResponse;
use sqlx::PgPool;

use crate::config::{AppConfig, StoreFailurePolicy};
use crate::errors::{AppError, render, see_other};
use crate::models::customer;
use crate::models::invoice::{FormState, InvoiceForm, InvoiceStatus};
use crate::templates_structs::{CustomerChoice, InvoiceFormTemplate, PageContext, StatusChoice};
use super::actions::{ActionOutcome, CREATE_STORE_FAILED, UPDATE_STORE_FAILED};

/// Which form is being shown: the create form or the edit form of one invoice.
#[derive(Debug, Clone)]
pub enum FormMode {
    Create,
    Edit(String),
}

impl FormMode {
    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Invoice",
            FormMode::Edit(_) => "Edit Invoice",
        }
    }

    fn action(&self) -> String {
        match self {
            FormMode::Create => "/dashboard/invoices".to_string(),
            FormMode::Edit(id) => format!("/dashboard/invoices/{id}"),
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Invoice",
            FormMode::Edit(_) => "Edit Invoice",
        }
    }

    fn store_failed_message(&self) -> &'static str {
        match self {
            FormMode::Create => CREATE_STORE_FAILED,
            FormMode::Edit(_) => UPDATE_STORE_FAILED,
        }
    }
}

/// Render the create/edit form, pre-filled with `values` and showing `state`.
pub async fn render_form(
    pool: &PgPool,
    session: &Session,
    config: &AppConfig,
    mode: &FormMode,
    values: &InvoiceForm,
    state: FormState,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, config)?;
    let selected_customer = values.customer_id.as_deref().unwrap_or("");
    let selected_status = values.status.as_deref().unwrap_or("");

    let customers = customer::find_all(pool)
        .await?
        .into_iter()
        .map(|c| {
            let id = c.id.to_string();
            CustomerChoice {
                selected: id == selected_customer,
                id,
                name: c.name,
            }
        })
        .collect();

    let statuses = InvoiceStatus::ALL
        .iter()
        .map(|s| StatusChoice {
            value: s.as_str(),
            label: s.label(),
            checked: s.as_str() == selected_status,
        })
        .collect();

    let tmpl = InvoiceFormTemplate {
        ctx,
        form_title: mode.title().to_string(),
        form_action: mode.action(),
        submit_label: mode.submit_label().to_string(),
        customers,
        statuses,
        amount: values.amount.clone().unwrap_or_default(),
        state,
    };
    render(tmpl)
}

/// What the HTTP layer does with an [`ActionOutcome`].
#[derive(Debug, PartialEq)]
pub enum Reply {
    SeeOther(String),
    Form(FormState),
}

/// Decide the reply for `outcome`; store failures follow `policy`.
pub fn reply_for(outcome: ActionOutcome, policy: StoreFailurePolicy, mode: &FormMode) -> Reply {
    match outcome {
        ActionOutcome::Redirect(path) => Reply::SeeOther(path),
        ActionOutcome::Invalid(state) => Reply::Form(state),
        ActionOutcome::StoreFailed { redirect_to, error } => match policy {
            StoreFailurePolicy::Redirect => {
                log::warn!("Store rejected invoice write ({error}); redirecting to {redirect_to} anyway");
                Reply::SeeOther(redirect_to)
            }
            StoreFailurePolicy::Report => Reply::Form(FormState::message(mode.store_failed_message())),
        },
    }
}

/// Turn an action outcome into the HTTP response.
pub async fn respond(
    outcome: ActionOutcome,
    pool: &PgPool,
    session: &Session,
    config: &AppConfig,
    mode: &FormMode,
    values: &InvoiceForm,
) -> Result<HttpResponse, AppError> {
    match reply_for(outcome, config.store_failure_policy, mode) {
        Reply::SeeOther(path) => Ok(see_other(&path)),
        Reply::Form(state) => render_form(pool, session, config, mode, values, state).await,
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::{StatusCode, header};

    use super::*;
    use crate::cache::INVOICES_PATH;
    use crate::handlers::invoice_handlers::crud::actions::CREATE_INVALID;
    use crate::models::invoice::FieldErrors;

    fn store_failed() -> ActionOutcome {
        ActionOutcome::StoreFailed {
            redirect_to: INVOICES_PATH.to_string(),
            error: sqlx::Error::Protocol("connection reset".into()),
        }
    }

    #[test]
    fn store_failure_redirects_once_under_default_policy() {
        let reply = reply_for(store_failed(), StoreFailurePolicy::Redirect, &FormMode::Create);
        assert_eq!(reply, Reply::SeeOther("/dashboard/invoices".to_string()));

        let Reply::SeeOther(path) = reply else { unreachable!() };
        let resp = see_other(&path);
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let locations: Vec<_> = resp.headers().get_all(header::LOCATION).collect();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].to_str().ok(), Some("/dashboard/invoices"));
    }

    #[test]
    fn store_failure_is_reported_on_the_form_when_configured() {
        let reply = reply_for(store_failed(), StoreFailurePolicy::Report, &FormMode::Create);
        assert_eq!(reply, Reply::Form(FormState::message(CREATE_STORE_FAILED)));

        let reply = reply_for(store_failed(), StoreFailurePolicy::Report, &FormMode::Edit("id-1".into()));
        assert_eq!(reply, Reply::Form(FormState::message(UPDATE_STORE_FAILED)));
    }

    #[test]
    fn success_and_invalid_ignore_policy() {
        for policy in [StoreFailurePolicy::Redirect, StoreFailurePolicy::Report] {
            let reply = reply_for(ActionOutcome::Redirect(INVOICES_PATH.into()), policy, &FormMode::Create);
            assert_eq!(reply, Reply::SeeOther(INVOICES_PATH.to_string()));

            let state = FormState::invalid(FieldErrors::default(), CREATE_INVALID);
            let reply = reply_for(ActionOutcome::Invalid(state.clone()), policy, &FormMode::Create);
            assert_eq!(reply, Reply::Form(state));
        }
    }
}
