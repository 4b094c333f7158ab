//! htmx request classification and response headers.
//!
//! Pages are always rendered whole; the boosted shell selects `#main` out of
//! the response, so handlers only need to know whether a redirect must go
//! through `HX-Redirect` instead of a 303.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

const CACHE_NO_STORE: &str = "no-store";
const HX_REDIRECT_HEADER: &str = "HX-Redirect";
const HX_PUSH_URL_HEADER: &str = "HX-Push-Url";

/// Whether the request was issued by htmx (boosted links included).
pub fn is_hx_request(headers: &HeaderMap) -> bool {
    header_is_true(headers, "hx-request")
}

/// An HTML response that must not be cached.
pub fn html_response(html: String, http_status: StatusCode) -> Response {
    (
        http_status,
        [
            (CONTENT_TYPE, "text/html; charset=utf-8"),
            (CACHE_CONTROL, CACHE_NO_STORE),
        ],
        html,
    )
        .into_response()
}

/// Send the browser to `location`. htmx only follows redirects it is told
/// about through `HX-Redirect`; plain requests get a 303.
pub fn redirect_response(headers: &HeaderMap, location: &str) -> Response {
    if !is_hx_request(headers) {
        return Redirect::to(location).into_response();
    }
    let mut response = StatusCode::OK.into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        response.headers_mut().insert(HX_REDIRECT_HEADER, value);
    }
    response
}

pub fn set_push_url_header(response: &mut Response, url: &str) {
    if let Ok(value) = HeaderValue::from_str(url) {
        response.headers_mut().insert(HX_PUSH_URL_HEADER, value);
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn header_is_true(headers: &HeaderMap, name: &str) -> bool {
    header_text(headers, name).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;

    #[test]
    fn hx_request_header_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        assert!(!is_hx_request(&headers));
        headers.insert("hx-request", " TRUE ".parse().unwrap());
        assert!(is_hx_request(&headers));
        headers.insert("hx-request", "false".parse().unwrap());
        assert!(!is_hx_request(&headers));
    }

    #[test]
    fn plain_requests_get_see_other() {
        let response = redirect_response(&HeaderMap::new(), "https://app.test/login");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "https://app.test/login");
    }

    #[test]
    fn htmx_requests_get_hx_redirect() {
        let mut headers = HeaderMap::new();
        headers.insert("hx-request", "true".parse().unwrap());
        let response = redirect_response(&headers, "https://app.test/signup");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[HX_REDIRECT_HEADER], "https://app.test/signup");
    }

    #[test]
    fn html_response_is_not_cached() {
        let mut response = html_response("<p>ok</p>".to_owned(), StatusCode::OK);
        set_push_url_header(&mut response, "/pilot-application");
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert_eq!(response.headers()[HX_PUSH_URL_HEADER], "/pilot-application");
    }
}
