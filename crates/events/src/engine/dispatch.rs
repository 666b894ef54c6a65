use log::info;
use seam_core::{HybridModel, SimulationState};

use crate::{Error, root_finder};

use super::{EventCore, StepEvent};

impl EventCore {
    /// Decides whether the last step ended in a time event, a state event,
    /// or neither.
    ///
    /// Call after [`update_zero_crossings`](Self::update_zero_crossings).
    /// If a zero crossing flipped sign and the integrator does not locate
    /// roots itself, the event is located by bisection first, which leaves
    /// `state` at the event time. A due sample event is reported as
    /// [`StepEvent::Time`] even when a state event occurred too; the pending
    /// state event is still applied by [`apply_event`](Self::apply_event).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if a model callback fails during bisection.
    pub fn classify_step<M: HybridModel>(
        &mut self,
        model: &mut M,
        state: &mut SimulationState,
    ) -> Result<StepEvent, Error> {
        self.candidates = self.zero_crossings.detect_state_event();
        self.event_time = state.time;

        if !self.candidates.is_empty() && !self.solver_root_finding {
            let solution =
                root_finder::find_root(model, state, &mut self.zero_crossings, &self.candidates)?;

            info!(
                "state event at t = {:.12} located in {} bisection steps",
                solution.time, solution.iters
            );
            self.event_time = solution.time;
            self.candidates = solution.candidates;
        }

        Ok(if self.schedule.is_activated() {
            StepEvent::Time
        } else if !self.candidates.is_empty() {
            StepEvent::State
        } else {
            StepEvent::None
        })
    }
}
