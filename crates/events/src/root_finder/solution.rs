use crate::EventCandidateSet;

/// The result of locating a state event.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The event time, the right bound of the final bracket.
    pub time: f64,

    /// The zero crossings responsible for the event.
    pub candidates: EventCandidateSet,

    /// True if the last bisection step isolated the candidates, false if the
    /// smallest-residual tie-break picked them.
    pub isolated: bool,

    /// Final bracket bounds.
    pub bracket: [f64; 2],

    /// Number of bisection iterations.
    pub iters: usize,
}
