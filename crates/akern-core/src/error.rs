use thiserror::Error;

/// Root error type for kernel estimation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AkernError {
    /// Nothing to estimate.
    #[error("empty graph: estimation needs at least one node")]
    EmptyGraph,

    /// The age discretization was requested with no bins.
    #[error("age bin count must be at least 1, got {0}")]
    BadAgeBins(usize),

    /// The fit driver needs at least one round to produce a kernel.
    #[error("iteration count must be at least 1, got {0}")]
    BadIterations(usize),

    /// Cooperative cancellation was requested mid-pass.
    #[error("estimation interrupted")]
    Interrupted,
}

pub type AkernResult<T> = Result<T, AkernError>;
