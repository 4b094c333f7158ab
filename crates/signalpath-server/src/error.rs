//! HTTP error types for the SignalPath server.
//!
//! Maps request and domain failures into HTML error pages. Every variant
//! renders the site shell with a message and a link home; store details go
//! to the log, never to the page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use signalpath_core::error::PreferenceError;
use signalpath_core::navigation::Route;

use crate::htmx::html_response;
use crate::views::{self, pages, preferences};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// No page lives at this path.
    NotFound(String),
    /// The request body could not be decoded.
    BadRequest(String),
    /// Only `GET` reaches page selection.
    MethodNotAllowed,
    /// A terminal preference-center failure.
    Preference(PreferenceError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Preference(err) => preference_status(err),
        }
    }
}

/// Status for a preference-center failure.
pub fn preference_status(err: &PreferenceError) -> StatusCode {
    match err {
        PreferenceError::MissingIdentity => StatusCode::BAD_REQUEST,
        PreferenceError::InvalidLink => StatusCode::NOT_FOUND,
        PreferenceError::Load(_) | PreferenceError::Save(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            Self::NotFound(path) => pages::not_found(path),
            Self::BadRequest(msg) => views::Page::new(
                "Bad request",
                Route::Home,
                pages::error_body("Something went wrong", msg),
            ),
            Self::MethodNotAllowed => views::Page::new(
                "Method not allowed",
                Route::Home,
                pages::error_body("Method not allowed", "This page can only be viewed."),
            ),
            Self::Preference(err) => {
                if let PreferenceError::Load(inner) | PreferenceError::Save(inner) = err {
                    tracing::warn!(error = %inner, "preference center failed");
                }
                preferences::error_page(err)
            }
        };

        html_response(views::render(&page, None), status)
    }
}

impl From<PreferenceError> for AppError {
    fn from(err: PreferenceError) -> Self {
        Self::Preference(err)
    }
}

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(err: axum::extract::rejection::FormRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}
