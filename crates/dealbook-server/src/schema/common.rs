//! Common API response wrapper types.
//!
//! [`ApiResponse`] provides the standard envelope for all successful API
//! responses. Errors never use this type; they are produced by
//! [`ApiError`](crate::error::ApiError) instead.

use serde::Serialize;

/// Standard API response envelope.
///
/// All successful responses wrap their payload in this structure. The
/// `success` field is always `true` for non-error responses. `count`
/// accompanies list payloads, `message` accompanies mutations.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for successful responses.
    pub success: bool,
    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of records in a list payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Outcome description for mutations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response carrying only data.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            count: None,
            message: None,
        }
    }

    /// Create a successful list response with an explicit record count.
    pub fn with_count(data: T, count: usize) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            count: Some(count),
            message: None,
        }
    }

    /// Create a successful mutation response with a message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            count: None,
            message: Some(message.into()),
        }
    }
}
