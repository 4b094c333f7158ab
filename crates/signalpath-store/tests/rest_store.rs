//! Integration tests for `RestStore` against an in-process fake of the
//! hosted PostgREST surface.
//!
//! The fake records every request it receives so tests can assert on the
//! exact headers, filters, and bodies the client sends.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use signalpath_store::{
    ConsentEvent, EmailPreference, LeadStore, PENDING_STATUS, PilotApplication, RestStore,
    RestStoreConfig, StoreError,
};

#[derive(Debug, Clone)]
struct Captured {
    method: String,
    path: String,
    query: String,
    headers: HeaderMap,
    body: Value,
}

type Log = Arc<Mutex<Vec<Captured>>>;

async fn fake_postgrest(State(log): State<Log>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    let query = parts.uri.query().unwrap_or_default().to_owned();
    let path = parts.uri.path().to_owned();

    log.lock().unwrap().push(Captured {
        method: parts.method.to_string(),
        path: path.clone(),
        query: query.clone(),
        headers: parts.headers.clone(),
        body: body.clone(),
    });

    match (parts.method.as_str(), path.as_str()) {
        ("POST", "/rest/v1/pilot_applications") => match body["email"].as_str() {
            Some("dup@x.com") => (
                StatusCode::CONFLICT,
                axum::Json(json!({
                    "code": "23505",
                    "message": "duplicate key value violates unique constraint \"pilot_applications_email_key\"",
                    "details": null,
                    "hint": null
                })),
            )
                .into_response(),
            Some("boom@x.com") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
            _ => StatusCode::CREATED.into_response(),
        },
        ("GET", "/rest/v1/email_preferences") => {
            if query.contains("email=eq.user%40x.com") || query.contains("email=eq.user@x.com") {
                axum::Json(json!([stored_row("user@x.com")])).into_response()
            } else if query.contains("email=eq.legacy%40x.com") || query.contains("email=eq.legacy@x.com") {
                let mut row = stored_row("legacy@x.com");
                row["frequency"] = json!("normal");
                axum::Json(json!([row])).into_response()
            } else {
                axum::Json(json!([])).into_response()
            }
        }
        ("POST", "/rest/v1/email_preferences") => {
            (StatusCode::CREATED, axum::Json(json!([body]))).into_response()
        }
        ("POST", "/rest/v1/rpc/record_consent") => StatusCode::NO_CONTENT.into_response(),
        _ => (StatusCode::NOT_FOUND, Body::empty()).into_response(),
    }
}

fn stored_row(email: &str) -> Value {
    json!({
        "email": email,
        "preference_token": "tok-1",
        "marketing_emails": false,
        "product_updates": true,
        "newsletter": false,
        "event_invitations": true,
        "partner_offers": true,
        "frequency": "monthly",
        "email_enabled": true,
        "sms_enabled": false,
        "updated_at": "2026-01-02T03:04:05Z"
    })
}

async fn spawn_fake() -> (RestStore, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .fallback(fake_postgrest)
        .with_state(Arc::clone(&log));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let store = RestStore::new(RestStoreConfig {
        url: format!("http://{addr}/"),
        api_key: "anon-key".to_owned(),
        timeout: None,
    })
    .unwrap();
    (store, log)
}

fn application(email: &str) -> PilotApplication {
    PilotApplication {
        company_name: "Acme".to_owned(),
        company_website: Some("https://acme.test".to_owned()),
        company_size: "11-50".to_owned(),
        industry: "SaaS".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: email.to_owned(),
        phone: None,
        job_title: "Head of Sales".to_owned(),
        linkedin_url: None,
        current_tools: None,
        monthly_outreach_volume: "1000-5000".to_owned(),
        primary_goal: "book-meetings".to_owned(),
        biggest_challenge: None,
        timeline: "immediately".to_owned(),
        referral_source: None,
        agree_to_terms: true,
        agree_to_feedback: true,
        status: PENDING_STATUS.to_owned(),
    }
}

#[tokio::test]
async fn insert_sends_api_key_headers_and_minimal_prefer() {
    let (store, log) = spawn_fake().await;
    store
        .insert_pilot_application(&application("ada@acme.test"))
        .await
        .unwrap();

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.headers["apikey"], "anon-key");
    assert_eq!(req.headers["authorization"], "Bearer anon-key");
    assert_eq!(req.headers["prefer"], "return=minimal");
    assert_eq!(req.body["status"], "pending");
    assert!(req.body.get("phone").is_none());
}

#[tokio::test]
async fn unique_violation_maps_to_duplicate_key() {
    let (store, _log) = spawn_fake().await;
    let err = store
        .insert_pilot_application(&application("dup@x.com"))
        .await
        .unwrap_err();
    assert!(err.is_duplicate(), "expected duplicate, got {err:?}");
}

#[tokio::test]
async fn service_unavailable_maps_to_transient() {
    let (store, _log) = spawn_fake().await;
    let err = store
        .insert_pilot_application(&application("boom@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Transient { .. }));
}

#[tokio::test]
async fn unreachable_store_is_transient() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = RestStore::new(RestStoreConfig {
        url: format!("http://{addr}"),
        api_key: "anon-key".to_owned(),
        timeout: None,
    })
    .unwrap();
    let err = store
        .record_consent(&ConsentEvent::email_marketing("a@x.com", true, "preference_center"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Transient { .. }));
}

#[tokio::test]
async fn select_by_email_uses_eq_filter_and_decodes_row() {
    let (store, log) = spawn_fake().await;
    let pref = store
        .find_preference_by_email("user@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pref.frequency, signalpath_store::Frequency::Monthly);
    assert!(!pref.newsletter);
    assert!(pref.updated_at.is_some());

    let requests = log.lock().unwrap().clone();
    assert!(requests[0].query.contains("select=*") || requests[0].query.contains("select=%2A"));
    assert!(requests[0].query.contains("limit=1"));
}

#[tokio::test]
async fn legacy_frequency_row_decodes_with_default() {
    let (store, _log) = spawn_fake().await;
    let pref = store
        .find_preference_by_email("legacy@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pref.email, "legacy@x.com");
    assert_eq!(pref.frequency, signalpath_store::Frequency::Weekly);
    assert!(pref.product_updates);
}

#[tokio::test]
async fn unknown_token_returns_none() {
    let (store, log) = spawn_fake().await;
    let found = store.find_preference_by_token("abc123").await.unwrap();
    assert!(found.is_none());

    let requests = log.lock().unwrap().clone();
    assert!(requests[0].query.contains("preference_token=eq.abc123"));
}

#[tokio::test]
async fn upsert_merges_on_email_and_stamps_updated_at() {
    let (store, log) = spawn_fake().await;
    let pref = EmailPreference::with_defaults("user@x.com");
    let stored = store.upsert_preference(&pref).await.unwrap();
    assert_eq!(stored.email, "user@x.com");
    assert!(stored.updated_at.is_some());

    let requests = log.lock().unwrap().clone();
    let req = &requests[0];
    assert!(req.query.contains("on_conflict=email"));
    assert_eq!(
        req.headers["prefer"],
        "resolution=merge-duplicates,return=representation"
    );
    assert!(req.body["updated_at"].is_string());
}

#[tokio::test]
async fn record_consent_posts_to_rpc() {
    let (store, log) = spawn_fake().await;
    store
        .record_consent(&ConsentEvent::email_marketing("user@x.com", false, "preference_center"))
        .await
        .unwrap();

    let requests = log.lock().unwrap().clone();
    let req = &requests[0];
    assert_eq!(req.path, "/rest/v1/rpc/record_consent");
    assert_eq!(req.body["consent_type"], "email_marketing");
    assert_eq!(req.body["consent_given"], false);
    assert_eq!(req.body["method"], "preference_center");
}
