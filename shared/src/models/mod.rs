//! Data models
//!
//! Shared between member-hub and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Member ids are the application's external keys (text); definition and
//! child-row ids are snowflake `i64`.

pub mod category;
pub mod import;
pub mod member;
pub mod member_task;
pub mod property;
pub mod tag;

// Re-exports
pub use category::*;
pub use import::*;
pub use member::*;
pub use member_task::*;
pub use property::*;
pub use tag::*;
