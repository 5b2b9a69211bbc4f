//! DTOs for link shortening endpoint.

use crate::error::ErrorInfo;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one or more URLs.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 100, message = "Between 1 and 100 URLs per request"))]
    #[validate(nested)]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
///
/// Only the length is checked here; scheme and host rules are enforced by
/// the link service so that every entry point applies the same gate.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UrlItem {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// Response containing batch processing results.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub summary: BatchSummary,
    pub items: Vec<ShortenResultItem>,
}

/// Individual result for a URL in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResultItem {
    Success {
        long_url: String,
        code: String,
        short_url: String,
    },
    Error {
        long_url: String,
        error: ErrorInfo,
    },
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
