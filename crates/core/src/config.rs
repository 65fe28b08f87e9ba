//! # Engine Configuration

use serde::{Deserialize, Serialize};

/// Configuration for the pipeline engine.
///
/// Collaborator-level limits (fetch bounds, retry counts, timeouts) belong
/// to the collaborator implementations, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum records listed verbatim in the synthesized report
    pub max_report_records: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_report_records: 10,
        }
    }
}
