//! Combinatorial search for mixed boolean/continuous subsystems.
//!
//! # Algorithm
//!
//! A mixed subsystem has boolean iteration variables whose values select
//! the continuous equations, while the continuous solution in turn determines
//! the booleans. The search starts from the current booleans, recorded as the
//! pre-values of this solve, and repeats:
//!
//! 1. Record the booleans, solve the continuous part, and re-evaluate the
//!    iteration expressions.
//! 2. If another relation of the model changed meanwhile, store the relations,
//!    re-evaluate the expressions, and start over. More than
//!    [`MAX_MIXED_ITERATIONS`] restarts fail the search.
//! 3. If the continuous part could not be solved, fail.
//! 4. If the booleans reproduced themselves, the configuration is consistent.
//! 5. Otherwise take the next subset from [`next_combination`] and set the
//!    booleans to their pre-values flipped at the chosen positions. When every
//!    subset has been tried the search is exhausted.
//!
//! With `n` iteration variables at most `2^n - 1` combinations are taken.
//!
//! # Observer Events
//!
//! One [`Event`] is emitted per iteration that did not restart. Observers can
//! return [`Action::StopEarly`] to halt the search.

mod action;
mod combination;
mod error;
mod event;
mod solution;
mod system;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use combination::next_combination;
pub use error::Error;
pub use event::Event;
pub use solution::{Failure, Solution, Status};
pub use system::MixedSystem;

use log::{debug, warn};
use seam_core::{MixedModel, Observer, SimulationState, Subsolve};

/// Maximum number of restarts caused by relation changes.
pub const MAX_MIXED_ITERATIONS: usize = 200;

/// Searches for a consistent boolean configuration of `system`.
///
/// On exhaustion, `state.needs_iteration` is set and a warning is logged
/// unless the model is initializing.
///
/// # Errors
///
/// Returns an error if a model callback fails. Not finding a consistent
/// configuration is reported through [`Solution::status`].
///
/// # Panics
///
/// Panics if an iteration variable is out of range of the state's booleans.
pub fn solve<M, Obs>(
    model: &M,
    system: &mut MixedSystem,
    state: &mut SimulationState,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    M: MixedModel,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let id = system.id();
    debug!(
        "solving mixed system {id} (equation {}) at t = {}",
        system.equation_index(),
        state.time
    );

    system.start(state);

    let mut steps = 0;
    let mut iters = 0;
    let mut relation_restarts = 0;

    let finish = |status: Status, steps: usize, iters: usize, relation_restarts: usize| {
        debug!("mixed system {id} finished with {status:?} after {steps} combination steps");
        Ok::<_, Error>(Solution {
            status,
            steps,
            iters,
            relation_restarts,
        })
    };

    loop {
        iters += 1;

        system.read_before(state);
        let subsolve = model
            .solve_continuous_subpart(id, state)
            .map_err(Error::model)?;
        model
            .update_iteration_expressions(id, state)
            .map_err(Error::model)?;
        system.read_after(state);

        if state.relations_changed() {
            state.store_relations();
            model
                .update_iteration_expressions(id, state)
                .map_err(Error::model)?;
            relation_restarts += 1;
            debug!("mixed system {id}: relation changed, restarting ({relation_restarts})");

            if relation_restarts > MAX_MIXED_ITERATIONS {
                warn!(
                    "mixed system {id} (equation {}): relations did not settle after \
                     {MAX_MIXED_ITERATIONS} restarts at t = {}",
                    system.equation_index(),
                    state.time
                );
                let status = Status::Failed(Failure::RelationsDiverged);
                return finish(status, steps, iters, relation_restarts);
            }
            continue;
        }

        let event = Event {
            iter: iters,
            subsolve,
            before: &system.before,
            after: &system.after,
        };
        let consistent = event.is_consistent();
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(Status::StoppedByObserver, steps, iters, relation_restarts);
        }

        if subsolve == Subsolve::Failed {
            warn!(
                "mixed system {id} (equation {}): continuous subsolve failed at t = {}",
                system.equation_index(),
                state.time
            );
            let status = Status::Failed(Failure::SubsolveFailed);
            return finish(status, steps, iters, relation_restarts);
        }

        if consistent {
            return finish(Status::Converged, steps, iters, relation_restarts);
        }

        if !next_combination(&mut system.search) {
            if !state.initial {
                warn!(
                    "error solving mixed equation system with index {} at t = {}",
                    system.equation_index(),
                    state.time
                );
            }
            state.needs_iteration = true;
            let status = Status::Failed(Failure::SearchExhausted);
            return finish(status, steps, iters, relation_restarts);
        }

        steps += 1;
        system.apply_search(state);
        debug!("mixed system {id}: trying {:?}", system.search);
    }
}

/// Searches for a consistent boolean configuration without observer support.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if a model callback fails.
pub fn solve_unobserved<M: MixedModel>(
    model: &M,
    system: &mut MixedSystem,
    state: &mut SimulationState,
) -> Result<Solution, Error> {
    solve(model, system, state, ())
}
