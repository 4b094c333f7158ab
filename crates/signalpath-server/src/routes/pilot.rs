//! `POST /pilot-application`

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::Response;

use signalpath_core::error::FormError;
use signalpath_core::pilot::{FieldValue, PilotApplicationForm, PilotField};

use crate::error::AppError;
use crate::state::AppState;
use crate::views::pilot;

use super::pages::render;

/// Decode the posted fields into a fresh form and submit it once.
///
/// The response always carries the whole page; htmx swaps `#pilot-panel`
/// out of it, so a failure re-renders the form with the visitor's values and
/// an inline message, and a success replaces the form with the confirmation.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(fields) = form?;

    let mut application = PilotApplicationForm::new(&state.site.pilot_email);
    for (name, raw) in &fields {
        match name.parse::<PilotField>() {
            Ok(field) => application.set_field(field, FieldValue::from_form(field, raw)),
            Err(e) => tracing::debug!(error = %e, "ignoring posted field"),
        }
    }

    let result = application.submit(state.store.as_ref()).await;
    state.pilot_outcomes.record(&result);

    let status = match &result {
        Ok(()) => StatusCode::OK,
        Err(err) if err.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        Err(FormError::DuplicateEmail(_)) => StatusCode::CONFLICT,
        Err(_) => StatusCode::BAD_GATEWAY,
    };

    Ok(render(&state, &pilot::page(&application), status))
}
