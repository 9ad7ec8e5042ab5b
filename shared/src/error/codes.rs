//! Unified error codes for member-hub
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Application (tenant) errors
//! - 5xxx: Import errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 3xxx: Application ====================
    /// Application not found
    AppNotFound = 3002,
    /// Token is scoped to another application
    AppMismatch = 3003,

    // ==================== 5xxx: Import ====================
    /// Import input has no header row
    ImportHeaderMissing = 5001,
    /// Header row has no column mapped to `id`
    ImportIdColumnMissing = 5002,
    /// Import exceeds the configured row limit
    ImportTooManyRows = 5003,
    /// Import aborted by a storage failure
    ImportAborted = 5004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Application
            ErrorCode::AppNotFound => "Application not found",
            ErrorCode::AppMismatch => "Token does not grant access to this application",

            // Import
            ErrorCode::ImportHeaderMissing => "Import has no header row",
            ErrorCode::ImportIdColumnMissing => "Header row has no column mapped to id",
            ErrorCode::ImportTooManyRows => "Import has too many rows",
            ErrorCode::ImportAborted => "Import aborted by a storage failure",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Application
            3002 => Ok(ErrorCode::AppNotFound),
            3003 => Ok(ErrorCode::AppMismatch),

            // Import
            5001 => Ok(ErrorCode::ImportHeaderMissing),
            5002 => Ok(ErrorCode::ImportIdColumnMissing),
            5003 => Ok(ErrorCode::ImportTooManyRows),
            5004 => Ok(ErrorCode::ImportAborted),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
