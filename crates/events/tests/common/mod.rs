#![allow(dead_code)]

use seam_core::{HybridModel, SimulationState};
use seam_events::{Error, EventCore, StepEvent};

/// Closed-form continuous dynamics standing in for an integrator.
pub trait Dynamics {
    fn advance(&self, state: &mut SimulationState, h: f64);
}

/// An applied event and the time it was applied at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    pub kind: StepEvent,
    pub time: f64,
}

/// Runs fixed nominal steps from the state's time to `stop`, applying every
/// event the core reports.
pub fn run<M>(
    core: &mut EventCore,
    model: &mut M,
    state: &mut SimulationState,
    stop: f64,
    step: f64,
) -> Result<Vec<Applied>, Error>
where
    M: HybridModel + Dynamics,
{
    let start = state.time;
    core.initialize(model, state, start, stop)?;

    let mut applied = Vec::new();
    while state.time < stop - 1e-12 {
        let h = step.min(stop - state.time);
        let h = core.align_step(state.time, h).unwrap_or(h);

        state.store_old_values();
        model.advance(state, h);

        core.update_zero_crossings(model, state)?;
        let kind = core.classify_step(model, state)?;
        if kind != StepEvent::None {
            core.apply_event(model, state)?;
            applied.push(Applied {
                kind,
                time: state.time,
            });
        }
        core.accept_step();
    }

    Ok(applied)
}
