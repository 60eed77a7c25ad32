use std::time::Duration;

/// Ways a search can end without producing a verdict on the deal.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("invalid deal: {0:#}")]
    InvalidDeal(anyhow::Error),

    #[error("memory exhausted after {states} search states")]
    AllocationFailure { states: usize },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
