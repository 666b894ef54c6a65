/// Why a mixed-system search failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("relations kept changing during the continuous subsolve")]
    RelationsDiverged,

    #[error("the continuous subsolve failed")]
    SubsolveFailed,

    #[error("every boolean combination was tried")]
    SearchExhausted,
}

/// Indicates how a mixed-system search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The iteration variables are consistent with the continuous solution.
    Converged,

    /// Stopped early due to an observer decision.
    StoppedByObserver,

    /// No consistent configuration was found.
    Failed(Failure),
}

/// The result of a mixed-system search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// Final search status.
    pub status: Status,

    /// Number of boolean combinations taken from the enumerator.
    pub steps: usize,

    /// Number of loop iterations, including relation restarts.
    pub iters: usize,

    /// Number of restarts caused by relation changes.
    pub relation_restarts: usize,
}

impl Solution {
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Returns true if the caller should iterate the discrete system again.
    #[must_use]
    pub fn needs_iteration(&self) -> bool {
        matches!(self.status, Status::Failed(Failure::SearchExhausted))
    }
}
