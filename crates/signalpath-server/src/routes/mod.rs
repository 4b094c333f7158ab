//! HTTP routes.
//!
//! Every `GET` that no explicit route claims falls through to page
//! selection, which resolves the path with [`Route::resolve`] and renders
//! exactly one page. Form posts have their own routes.
//!
//! [`Route::resolve`]: signalpath_core::navigation::Route::resolve

pub mod auth;
pub mod metrics;
pub mod pages;
pub mod pilot;
pub mod preferences;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Concurrent form submissions allowed before requests queue.
const FORM_CONCURRENCY_LIMIT: usize = 64;

/// Build the full application router with middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let forms = Router::new()
        .route("/pilot-application", get(pages::show).post(pilot::submit))
        .route("/preferences", get(pages::show).post(preferences::save))
        .route("/unsubscribe", get(pages::show).post(preferences::unsubscribe))
        .layer(tower::limit::ConcurrencyLimitLayer::new(FORM_CONCURRENCY_LIMIT));

    Router::new()
        .merge(forms)
        .merge(auth::router())
        .merge(metrics::router())
        .fallback(pages::show)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}
