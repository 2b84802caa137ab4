//! Analysis configuration threaded through the façade (§3, §4.4, §5).

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Decisions with more variables than this are reported
    /// `NonTreeNonCorrectable` without a reorder search being attempted.
    pub max_reorder_variables: usize,

    /// Optional wall-clock budget for a single decision's reorder search.
    /// A breach is reported as `NonTreeNonCorrectable`, never a hard error.
    pub deadline: Option<Duration>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_reorder_variables: 5,
            deadline: None,
        }
    }
}
