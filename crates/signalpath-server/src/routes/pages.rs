//! Page selection for every `GET`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;

use signalpath_core::error::PreferenceError;
use signalpath_core::navigation::{Location, Route};
use signalpath_core::pilot::PilotApplicationForm;

use crate::content::find_post;
use crate::error::AppError;
use crate::htmx::html_response;
use crate::state::AppState;
use crate::views::{self, Page, pages, pilot};

use super::{auth, preferences};

/// Resolve the request path to one page and render it.
pub async fn show(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(AppError::MethodNotAllowed);
    }

    let target = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    let location = Location::parse(target);
    let route = location.route();
    tracing::debug!(location = %location, ?route, "page selected");

    let page = match route {
        Route::Home => pages::home(),
        Route::About => pages::about(),
        Route::Blog => pages::blog_index(),
        Route::BlogPost { slug } => match find_post(&slug) {
            Some(post) => pages::blog_post(post),
            None => return Err(AppError::NotFound(location.path)),
        },
        Route::PilotApplication => pilot::page(&PilotApplicationForm::new(&state.site.pilot_email)),
        Route::Privacy => pages::privacy(&state.site),
        Route::Terms => pages::terms(&state.site),
        Route::Login => return Ok(auth::login_redirect(&state, &headers)),
        Route::Signup => return Ok(auth::signup_redirect(&state, &headers)),
        Route::Unsubscribe => match location.query_param("email") {
            Some(email) if !email.trim().is_empty() => {
                views::preferences::unsubscribe_confirm(&email.trim().to_lowercase(), None)
            }
            _ => return Err(PreferenceError::MissingIdentity.into()),
        },
        Route::Preferences => preferences::load_page(&state, &location).await?,
        Route::LeadDetail { id } => pages::lead_detail(&id, &state.site),
        Route::NotFound { path } => return Err(AppError::NotFound(path)),
    };

    Ok(render(&state, &page, StatusCode::OK))
}

/// Render `page` in the shell with the site settings.
pub fn render(state: &AppState, page: &Page, status: StatusCode) -> Response {
    html_response(views::render(page, Some(&state.site)), status)
}
