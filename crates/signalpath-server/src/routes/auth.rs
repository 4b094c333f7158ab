//! Login and signup hand-off.
//!
//! Accounts live in the product app. These routes only send the visitor
//! there, through `HX-Redirect` when the click came from a boosted link.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::get;

use crate::htmx::redirect_response;
use crate::state::AppState;

/// Build the `/login` and `/signup` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/signup", get(signup))
}

async fn login(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    login_redirect(&state, &headers)
}

async fn signup(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    signup_redirect(&state, &headers)
}

pub fn login_redirect(state: &AppState, headers: &HeaderMap) -> Response {
    redirect_response(headers, &format!("{}/login", state.site.app_url))
}

pub fn signup_redirect(state: &AppState, headers: &HeaderMap) -> Response {
    redirect_response(headers, &format!("{}/signup", state.site.app_url))
}
