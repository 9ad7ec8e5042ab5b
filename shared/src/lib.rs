//! Shared types for member-hub
//!
//! Error types, API response envelope, data models and small utilities used
//! by the server and by API consumers.

pub mod error;
pub mod models;
pub mod util;
