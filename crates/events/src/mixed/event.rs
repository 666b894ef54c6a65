use seam_core::Subsolve;

/// Event emitted after each search iteration that did not restart on a
/// relation change.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration number, starting at 1.
    pub iter: usize,

    /// Outcome of the continuous subsolve.
    pub subsolve: Subsolve,

    /// Iteration variables before the subsolve.
    pub before: &'a [bool],

    /// Iteration variables after the iteration expressions were updated.
    pub after: &'a [bool],
}

impl Event<'_> {
    /// Returns true if the iteration variables reproduced themselves.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.before == self.after
    }
}
