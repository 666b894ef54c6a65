use seam_core::Sign;

use super::BISECTION_TOL;

/// One end of the bisection bracket.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Endpoint {
    /// Simulation time.
    pub(super) time: f64,

    /// Continuous states at `time`.
    pub(super) states: Vec<f64>,

    /// Zero-crossing values at `time`.
    pub(super) values: Vec<f64>,
}

/// Time interval known to contain the event, with the states and
/// zero-crossing values at both ends.
///
/// `signs` holds the last nonzero sign of each crossing seen at or before
/// the left bound. A value that only touches zero keeps the older sign, so a
/// crossing is never anchored on a zero.
#[derive(Debug, Clone)]
pub(super) struct Bracket {
    pub(super) left: Endpoint,
    pub(super) right: Endpoint,
    signs: Vec<Sign>,
}

impl Bracket {
    pub(super) fn new(left: Endpoint, right: Endpoint) -> Self {
        debug_assert!(left.time <= right.time, "bracket bounds are reversed");
        let signs = left.values.iter().copied().map(Sign::of).collect();
        Self { left, right, signs }
    }

    /// Returns true if crossing `index` has strictly flipped sign at `value`
    /// relative to the left side of the bracket.
    pub(super) fn crosses(&self, index: usize, value: f64) -> bool {
        Sign::of(value).is_flip(self.signs[index])
    }

    /// Returns the width of the current bounds.
    pub(super) fn width(&self) -> f64 {
        self.right.time - self.left.time
    }

    /// Returns the midpoint of the current bounds.
    pub(super) fn midpoint(&self) -> f64 {
        0.5 * (self.left.time + self.right.time)
    }

    /// Returns true once the width is within tolerance, or once no
    /// representable time is left strictly between the bounds.
    pub(super) fn is_converged(&self) -> bool {
        let mid = self.midpoint();
        self.width() <= BISECTION_TOL || mid <= self.left.time || mid >= self.right.time
    }

    /// Approximates the states at the midpoint by averaging both ends.
    pub(super) fn midpoint_states(&self) -> Vec<f64> {
        self.left
            .states
            .iter()
            .zip(&self.right.states)
            .map(|(a, b)| 0.5 * (a + b))
            .collect()
    }

    /// Shrinks the bounds to `[left, mid]`.
    pub(super) fn shrink_right(&mut self, mid: Endpoint) {
        self.right = mid;
    }

    /// Shrinks the bounds to `[mid, right]`.
    ///
    /// Crossings that are exactly zero at `mid` keep their previous sign.
    pub(super) fn shrink_left(&mut self, mid: Endpoint) {
        for (sign, &value) in self.signs.iter_mut().zip(&mid.values) {
            let next = Sign::of(value);
            if next != Sign::Zero {
                *sign = next;
            }
        }
        self.left = mid;
    }

    pub(super) fn bounds(&self) -> [f64; 2] {
        [self.left.time, self.right.time]
    }
}
