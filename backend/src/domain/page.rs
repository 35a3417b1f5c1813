//! List response envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::case::Case;

/// Pagination envelope for the case list endpoint.
///
/// The service performs no server-side slicing: `page` is always 0 and
/// `size` equals `total_elements`. The envelope keeps the paged shape so
/// clients written against a paged listing keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasePage {
    /// The full result set.
    pub content: Vec<Case>,
    /// Page index; always 0.
    pub page: u32,
    /// Page size; equals `total_elements`.
    pub size: usize,
    /// Total number of records.
    pub total_elements: usize,
}

impl CasePage {
    /// Wrap the full result set in the degenerate single-page envelope.
    #[must_use]
    pub fn unpaged(content: Vec<Case>) -> Self {
        let total = content.len();
        Self {
            content,
            page: 0,
            size: total,
            total_elements: total,
        }
    }
}
