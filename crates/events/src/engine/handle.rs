use log::{debug, info, warn};
use seam_core::{HybridModel, SimulationState};

use crate::Error;

use super::EventCore;

impl EventCore {
    /// Applies the event classified by [`classify_step`](Self::classify_step).
    ///
    /// Fires the due sample events, moves the state to the event time of a
    /// pending state event, re-resolves the discrete system, and
    /// resynchronizes the zero crossings. Afterwards the fired samples are
    /// advanced by one interval.
    ///
    /// Every call slides the chattering window by one slot. If the window
    /// fills with state events closer together than the nominal step size a
    /// warning is logged once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Chattering`] if chattering is detected and the config
    /// requests an abort; nothing further is applied in that case.
    /// Returns [`Error::Model`] if a model callback fails.
    pub fn apply_event<M: HybridModel>(
        &mut self,
        model: &mut M,
        state: &mut SimulationState,
    ) -> Result<(), Error> {
        let sample_activated = self.schedule.is_activated();
        if sample_activated {
            state.store_pre_values();
            self.schedule.fire(state.time);
        }

        self.chattering.evict();
        let candidates = std::mem::take(&mut self.candidates);
        if let Some(last) = candidates.last() {
            state.time = self.event_time;
            for index in candidates.iter() {
                let info = model.zero_crossing_info(index);
                info!(
                    "[{index}] {} (equations {:?}) at t = {:.12}",
                    info.description, info.equations, self.event_time
                );
            }

            self.stats.state_events += 1;
            self.chattering.push(Some(self.event_time));
            self.check_chattering(model, last)?;
        } else {
            self.chattering.push(None);
        }

        model
            .update_discrete_system(state, self.schedule.samples())
            .map_err(Error::model)?;
        self.zero_crossings
            .save_after_event(model, state)
            .map_err(Error::model)?;

        if sample_activated && self.schedule.advance() > 0 {
            self.stats.sample_events += 1;
        }

        debug!("event applied at t = {}", state.time);
        Ok(())
    }

    fn check_chattering<M: HybridModel>(&mut self, model: &M, index: usize) -> Result<(), Error> {
        let step_size = self.config.step_size();
        let Some((from, to)) = self.chattering.check(step_size) else {
            return Ok(());
        };

        let description = model.zero_crossing_info(index).description;
        let count = self.chattering.capacity();
        self.stats.chattering_warnings += 1;
        warn!(
            "chattering detected around t = {from:.12}..{to:.12} ({count} state events in a row \
             within less than the step size {step_size}), zero crossing [{index}] {description}"
        );

        if self.config.abort_on_chattering() {
            return Err(Error::Chattering {
                index,
                description: description.to_owned(),
                from,
                to,
                count,
                step_size,
            });
        }
        Ok(())
    }
}
