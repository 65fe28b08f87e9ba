//! # Activity Analysis
//!
//! Pure, batch-oriented analysis of activity records:
//!
//! - `taxonomy` - fixed ordered category taxonomy and classifier
//! - `aggregate` - chronological, categorical and lexical aggregations
//! - `highlights` - per-category exemplar blocks for the report
//!
//! Nothing here performs I/O or holds state across runs.

use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod highlights;
pub mod taxonomy;

pub use aggregate::{Aggregations, CategoryBucket, DateCount, TokenCount};
pub use highlights::compose_highlights;
pub use taxonomy::Category;

/// One activity record (a commit), immutable once collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Short identifier (e.g. abbreviated hash)
    pub id: String,
    /// Free-text activity message
    pub message: String,
    /// Author name
    pub author: String,
    /// ISO-8601 timestamp string, parsed lazily by the aggregator
    pub timestamp: String,
}

impl ActivityRecord {
    pub fn new(
        id: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            author: author.into(),
            timestamp: timestamp.into(),
        }
    }
}
