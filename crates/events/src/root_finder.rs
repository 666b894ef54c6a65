//! Bisection of a step interval down to the time of a state event.
//!
//! # Algorithm
//!
//! The bracket starts as `[old_time, time]` of the last step, with the
//! continuous states and zero-crossing values at both ends. Each iteration
//! evaluates the zero crossings at the midpoint, using the average of the
//! bracket states as a first-order estimate of the trajectory there. If any
//! candidate has strictly flipped sign relative to its last nonzero sign on
//! the left, the event lies in the left half; otherwise it lies in the right
//! half. A value of exactly zero is not a flip and never becomes the left
//! reference, so a crossing that only touches zero before it changes sign is
//! tracked past the touch. Iteration stops once the bracket is no wider than
//! [`BISECTION_TOL`].
//!
//! The candidates isolated by the last iteration are the cause of the event.
//! If the last iteration moved right, every candidate whose absolute value at
//! the right bound is the smallest among the candidates is reported, so
//! crossings that converge together are all included.
//!
//! # State handling
//!
//! Midpoint evaluation happens on the borrowed [`SimulationState`]. Before
//! returning, the state is first put at the left bound so the model can
//! update its continuous system and relation pre-values there, then moved to
//! the event time with the right-bound states. The tracker's pre-values are
//! never touched; its current values are replaced by those at the event time.

mod bracket;
mod solution;


pub use solution::Solution;

use log::debug;
use seam_core::{HybridModel, SimulationState};

use crate::{EventCandidateSet, Error, zero_crossing::ZeroCrossings};

use bracket::{Bracket, Endpoint};

/// Absolute tolerance on the bracket width, in units of simulation time.
pub const BISECTION_TOL: f64 = 1e-9;

/// Locates the state event within the last step.
///
/// `candidates` are the crossings whose sign flipped over the step, as
/// reported by [`ZeroCrossings::detect_state_event`].
///
/// # Errors
///
/// Returns [`Error::Model`] if a model callback fails.
///
/// # Panics
///
/// Panics if the model reports a different number of zero crossings than
/// the tracker holds.
pub fn find_root<M: HybridModel>(
    model: &mut M,
    state: &mut SimulationState,
    tracker: &mut ZeroCrossings,
    candidates: &EventCandidateSet,
) -> Result<Solution, Error> {
    assert_eq!(
        model.zero_crossing_count(),
        tracker.len(),
        "model zero-crossing count does not match the tracker"
    );

    let mut bracket = Bracket::new(
        Endpoint {
            time: state.old_time,
            states: state.old_states().to_vec(),
            values: tracker.pre_values().to_vec(),
        },
        Endpoint {
            time: state.time,
            states: state.states().to_vec(),
            values: tracker.values().to_vec(),
        },
    );

    let mut isolated = EventCandidateSet::new();
    let mut iters = 0;

    while !bracket.is_converged() {
        iters += 1;

        let time = bracket.midpoint();
        let states = bracket.midpoint_states();
        state.time = time;
        state.set_states(&states);

        let mut values = vec![0.0; tracker.len()];
        model.update_inputs(state).map_err(Error::model)?;
        model
            .zero_crossings(state, &mut values)
            .map_err(Error::model)?;

        isolated = candidates
            .iter()
            .filter(|&index| bracket.crosses(index, values[index]))
            .collect();

        debug!(
            "bisection {iters}: [{}, {}] mid {time}, {} crossing(s) in the left half",
            bracket.left.time,
            bracket.right.time,
            isolated.len()
        );

        let mid = Endpoint {
            time,
            states,
            values,
        };
        if isolated.is_empty() {
            bracket.shrink_left(mid);
        } else {
            bracket.shrink_right(mid);
        }
    }

    let is_isolated = !isolated.is_empty();
    if !is_isolated {
        isolated = smallest_residuals(candidates, &bracket.right.values);
    }

    tracker.set_values(&bracket.right.values);
    restore(model, state, &bracket)?;

    Ok(Solution {
        time: bracket.right.time,
        candidates: isolated,
        isolated: is_isolated,
        bracket: bracket.bounds(),
        iters,
    })
}

/// Selects every candidate whose absolute value equals the smallest one.
fn smallest_residuals(candidates: &EventCandidateSet, values: &[f64]) -> EventCandidateSet {
    let min = candidates
        .iter()
        .map(|index| values[index].abs())
        .fold(f64::INFINITY, f64::min);

    candidates
        .iter()
        .filter(|&index| values[index].abs() == min)
        .collect()
}

/// Leaves the state at the event time after updating the model at the left
/// bound.
fn restore<M: HybridModel>(
    model: &mut M,
    state: &mut SimulationState,
    bracket: &Bracket,
) -> Result<(), Error> {
    state.time = bracket.left.time;
    state.set_states(&bracket.left.states);
    model.update_continuous_system(state).map_err(Error::model)?;
    model.update_relations_pre(state).map_err(Error::model)?;

    state.time = bracket.right.time;
    state.set_states(&bracket.right.states);
    Ok(())
}
