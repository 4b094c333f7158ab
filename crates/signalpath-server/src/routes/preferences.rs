//! Email preference center: load, save, unsubscribe.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::Response;

use signalpath_core::error::PreferenceError;
use signalpath_core::navigation::Location;
use signalpath_core::preferences::{PreferenceDraft, PreferenceField, PreferenceIdentity};
use signalpath_store::{EmailPreference, Frequency};

use crate::error::{AppError, preference_status};
use crate::htmx::set_push_url_header;
use crate::state::AppState;
use crate::views::Page;
use crate::views::preferences::{self as view, Flash};

use super::pages::render;

/// `GET /preferences?email=…` or `?token=…`. Exactly one lookup per load.
pub async fn load_page(state: &AppState, location: &Location) -> Result<Page, AppError> {
    let email = location.query_param("email");
    let token = location.query_param("token");
    let identity = PreferenceIdentity::from_query(email.as_deref(), token.as_deref())?;

    let preference = state.preferences.load(&identity).await?;
    Ok(view::page(&preference, None))
}

/// Posted preference form. Browsers omit unchecked boxes, so every toggle
/// starts off and only posted names turn on.
#[derive(Debug)]
struct PostedPreferences {
    email: Option<String>,
    draft: PreferenceDraft,
}

impl PostedPreferences {
    fn decode(fields: &[(String, String)]) -> Self {
        let mut email = None;
        let mut draft = PreferenceDraft::all_off(Frequency::default());
        for (name, value) in fields {
            match name.as_str() {
                "email" => email = Some(value.trim().to_lowercase()).filter(|e| !e.is_empty()),
                "frequency" => match value.parse::<Frequency>() {
                    Ok(freq) => draft.set_frequency(freq),
                    Err(e) => tracing::debug!(error = %e, "keeping default frequency"),
                },
                other => {
                    if let Some(field) = PreferenceField::from_name(other) {
                        draft.set_field(field, !value.is_empty());
                    }
                }
            }
        }
        Self { email, draft }
    }
}

/// `POST /preferences`
pub async fn save(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(fields) = form?;
    let posted = PostedPreferences::decode(&fields);
    let email = posted.email.ok_or(PreferenceError::MissingIdentity)?;

    match state.preferences.save(&email, &posted.draft).await {
        Ok(saved) => {
            let page = view::page(&saved.preference, Some(Flash::Saved(&saved.banner)));
            let mut response = render(&state, &page, StatusCode::OK);
            set_push_url_header(
                &mut response,
                &format!("/preferences?token={}", saved.preference.preference_token),
            );
            Ok(response)
        }
        Err(err) if !err.is_terminal() => {
            // Keep what the visitor chose so they can press save again.
            let mut preview = EmailPreference::with_defaults(&email);
            posted.draft.apply_to(&mut preview);
            let page = view::page(&preview, Some(Flash::Failed(err.user_message())));
            Ok(render(&state, &page, preference_status(&err)))
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /unsubscribe`
pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(fields) = form?;
    let posted = PostedPreferences::decode(&fields);
    let email = posted.email.ok_or(PreferenceError::MissingIdentity)?;

    match state.preferences.unsubscribe(&email).await {
        Ok(preference) => Ok(render(&state, &view::unsubscribed(&preference), StatusCode::OK)),
        Err(err) if !err.is_terminal() => {
            let page = view::unsubscribe_confirm(&email, Some(err.user_message()));
            Ok(render(&state, &page, preference_status(&err)))
        }
        Err(err) => Err(err.into()),
    }
}
