//! SignalPath HTTP server.
//!
//! Wires the core controllers, the lead store, and the server-rendered views
//! into an Axum router. Serves the marketing pages, the pilot application
//! form, and the email preference center.

pub mod config;
pub mod content;
pub mod error;
pub mod htmx;
pub mod routes;
pub mod state;
pub mod views;
