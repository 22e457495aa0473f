//! Admin console for a research-report platform.
//!
//! The pure state logic (filtering, review cards, grant form, dashboard
//! figures) lives in plain modules that build and test on the host. The
//! `components` module renders it with Yew in the browser.

pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod grant;
pub mod models;
pub mod requests;
pub mod route;
pub mod storage;

pub use api::ApiClient;
pub use auth::AuthContext;
pub use config::AppConfig;
pub use error::{ConsoleError, Result};
