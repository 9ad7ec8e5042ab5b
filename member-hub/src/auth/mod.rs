//! Authentication

pub mod app_auth;

pub use app_auth::{AppIdentity, app_auth_middleware};
