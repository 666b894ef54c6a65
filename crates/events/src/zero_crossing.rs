//! Zero-crossing sign tracking.
//!
//! [`ZeroCrossings`] holds the current value of every zero-crossing
//! expression and its pre-value from the last synchronization point. A state
//! event candidate is any crossing whose sign class strictly flipped between
//! the two.

use log::debug;
use seam_core::{HybridModel, SimulationState, Sign};

use crate::EventCandidateSet;

/// Current and pre values of every zero-crossing expression.
///
/// Pre-values change only at synchronization points: [`synchronize`] after
/// an accepted step and [`save_after_event`] after an applied event.
///
/// [`synchronize`]: ZeroCrossings::synchronize
/// [`save_after_event`]: ZeroCrossings::save_after_event
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroCrossings {
    values: Vec<f64>,
    pre: Vec<f64>,
}

impl ZeroCrossings {
    /// Creates a tracker for `count` zero crossings, all values zero.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![0.0; count],
            pre: vec![0.0; count],
        }
    }

    /// Returns the number of zero crossings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the model has no zero crossings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the current values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the pre-values.
    #[must_use]
    pub fn pre_values(&self) -> &[f64] {
        &self.pre
    }

    /// Returns the current sign class of crossing `index`.
    #[must_use]
    pub fn sign(&self, index: usize) -> Sign {
        Sign::of(self.values[index])
    }

    /// Returns the pre sign class of crossing `index`.
    #[must_use]
    pub fn pre_sign(&self, index: usize) -> Sign {
        Sign::of(self.pre[index])
    }

    /// Re-evaluates the current values on `state`.
    ///
    /// # Errors
    ///
    /// Returns the model error if evaluation fails.
    ///
    /// # Panics
    ///
    /// Panics if the model reports a different number of zero crossings.
    pub fn evaluate<M: HybridModel>(
        &mut self,
        model: &M,
        state: &mut SimulationState,
    ) -> Result<(), M::Error> {
        assert_eq!(
            model.zero_crossing_count(),
            self.len(),
            "model zero-crossing count does not match the tracker"
        );
        model.zero_crossings(state, &mut self.values)
    }

    /// Returns every crossing whose sign strictly flipped since the pre-value.
    ///
    /// Only reads; calling it twice without an evaluation in between gives
    /// the same set.
    #[must_use]
    pub fn detect_state_event(&self) -> EventCandidateSet {
        let mut candidates = EventCandidateSet::new();

        for index in 0..self.len() {
            let pre = self.pre_sign(index);
            let current = self.sign(index);

            if pre.is_flip(current) {
                debug!("zero crossing {index} changed: {pre} -> {current}");
                candidates.insert(index);
            } else if pre != current {
                debug!("zero crossing {index} touched zero: {pre} -> {current}");
            }
        }

        candidates
    }

    /// Copies the current values into the pre-values.
    pub fn synchronize(&mut self) {
        self.pre.copy_from_slice(&self.values);
    }

    /// Re-evaluates every crossing after an event and synchronizes the
    /// pre-values with the fresh signs.
    ///
    /// # Errors
    ///
    /// Returns the model error if evaluation fails.
    pub fn save_after_event<M: HybridModel>(
        &mut self,
        model: &M,
        state: &mut SimulationState,
    ) -> Result<(), M::Error> {
        debug!("saving all zero crossings after an event at t = {}", state.time);
        self.evaluate(model, state)?;
        self.synchronize();
        Ok(())
    }

    /// Overwrites the current values, e.g. with those at a refined event time.
    pub(crate) fn set_values(&mut self, values: &[f64]) {
        self.values.copy_from_slice(values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use seam_core::{SampleEvent, ZeroCrossingInfo};

    /// Zero crossings read straight from the reals.
    struct Passthrough;

    impl HybridModel for Passthrough {
        type Error = Infallible;

        fn zero_crossing_count(&self) -> usize {
            3
        }

        fn zero_crossings(
            &self,
            state: &mut SimulationState,
            values: &mut [f64],
        ) -> Result<(), Self::Error> {
            values.copy_from_slice(&state.reals[..3]);
            Ok(())
        }

        fn zero_crossing_info(&self, _index: usize) -> ZeroCrossingInfo<'_> {
            ZeroCrossingInfo {
                description: "x",
                equations: &[],
            }
        }

        fn update_discrete_system(
            &mut self,
            _state: &mut SimulationState,
            _samples: &[SampleEvent],
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        fn update_continuous_system(
            &mut self,
            _state: &mut SimulationState,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn tracker_at(pre: [f64; 3], current: [f64; 3]) -> ZeroCrossings {
        let model = Passthrough;
        let mut tracker = ZeroCrossings::new(3);

        let mut state = SimulationState::new(0.0, pre.to_vec(), 3);
        tracker.save_after_event(&model, &mut state).expect("infallible");

        state.reals = current.to_vec();
        tracker.evaluate(&model, &mut state).expect("infallible");
        tracker
    }

    #[test]
    fn detects_strict_flips_only() {
        let tracker = tracker_at([-1.0, 1.0, 2.0], [1.0, -0.5, 3.0]);
        let candidates = tracker.detect_state_event();
        assert_eq!(candidates.iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn touching_zero_is_not_a_flip() {
        let tracker = tracker_at([-1.0, 0.0, 1.0], [0.0, 1.0, 0.0]);
        assert!(tracker.detect_state_event().is_empty());
    }

    #[test]
    fn detection_is_idempotent() {
        let tracker = tracker_at([-1.0, -1.0, 1.0], [1.0, -1.0, -1.0]);
        let first = tracker.detect_state_event();
        let second = tracker.detect_state_event();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn synchronize_clears_candidates() {
        let mut tracker = tracker_at([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        assert_eq!(tracker.detect_state_event().len(), 3);

        tracker.synchronize();
        assert!(tracker.detect_state_event().is_empty());
        assert_eq!(tracker.pre_values(), tracker.values());
    }

    #[test]
    #[should_panic(expected = "zero-crossing count")]
    fn evaluate_rejects_mismatched_model() {
        let mut tracker = ZeroCrossings::new(2);
        let mut state = SimulationState::new(0.0, vec![0.0; 3], 3);
        let _ = tracker.evaluate(&Passthrough, &mut state);
    }
}
