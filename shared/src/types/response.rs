//! API response envelope

use serde::{Deserialize, Serialize};

use super::pagination::Page;

/// Standard success envelope: `{ data, total?, message? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response payload
    pub data: T,

    /// Total matches before pagination (list responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap a single payload
    pub fn new(data: T) -> Self {
        Self {
            data,
            total: None,
            message: None,
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wrap a page, carrying its total
    pub fn list(page: Page<T>) -> Self {
        Self {
            data: page.items,
            total: Some(page.total),
            message: None,
        }
    }
}
