use std::cell::Cell;

use seam_core::{BoolVar, MixedModel, SimulationState, Subsolve};
use thiserror::Error;

use super::{
    Action, Error, Event, Failure, MAX_MIXED_ITERATIONS, MixedSystem, Status, solve,
    solve_unobserved,
};

#[derive(Debug, Error)]
#[error("unknown subsystem {0}")]
struct UnknownSystem(usize);

/// A three-switch subsystem that is consistent only in one configuration.
///
/// Any other configuration flips the first switch when the iteration
/// expressions are evaluated.
struct Switches {
    vars: Vec<BoolVar>,
    target: Option<[bool; 3]>,
    subsolve: Subsolve,
    relation_changes: Cell<usize>,
    subsolves: Cell<usize>,
}

impl Switches {
    fn consistent_at(target: [bool; 3]) -> Self {
        Self {
            vars: (1..=3).map(BoolVar::new).collect(),
            target: Some(target),
            subsolve: Subsolve::Solved,
            relation_changes: Cell::new(0),
            subsolves: Cell::new(0),
        }
    }

    fn never_consistent() -> Self {
        Self {
            target: None,
            ..Self::consistent_at([false; 3])
        }
    }

    fn system(&self) -> MixedSystem {
        MixedSystem::new(0, 42, self.vars.clone())
    }

    fn current(&self, state: &SimulationState) -> [bool; 3] {
        [0, 1, 2].map(|i| state.boolean(self.vars[i]))
    }
}

impl MixedModel for Switches {
    type Error = UnknownSystem;

    fn solve_continuous_subpart(
        &self,
        system: usize,
        state: &mut SimulationState,
    ) -> Result<Subsolve, Self::Error> {
        if system != 0 {
            return Err(UnknownSystem(system));
        }
        self.subsolves.set(self.subsolves.get() + 1);

        let pending = self.relation_changes.get();
        if pending > 0 {
            self.relation_changes.set(pending - 1);
            state.relations[0] = !state.relations[0];
        }
        Ok(self.subsolve)
    }

    fn update_iteration_expressions(
        &self,
        _system: usize,
        state: &mut SimulationState,
    ) -> Result<(), Self::Error> {
        if self.target != Some(self.current(state)) {
            let first = self.vars[0];
            state.set_boolean(first, !state.boolean(first));
        }
        Ok(())
    }
}

/// Boolean 0 is unrelated to the subsystem; booleans 1..=3 are its switches.
fn state_with(switches: [bool; 3]) -> SimulationState {
    let mut booleans = vec![true];
    booleans.extend(switches);
    SimulationState::new(0.0, vec![], 0)
        .with_booleans(booleans)
        .with_relations(1)
}

#[test]
fn already_consistent_converges_without_search() {
    let model = Switches::consistent_at([true, false, true]);
    let mut system = model.system();
    let mut state = state_with([true, false, true]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert!(solution.is_converged());
    assert_eq!(solution.steps, 0);
    assert_eq!(solution.iters, 1);
}

#[test]
fn finds_target_in_enumeration_order() {
    let model = Switches::consistent_at([false, true, true]);
    let mut system = model.system();
    let mut state = state_with([false; 3]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    // 000, 100, 010, 001, 110, 101, 011
    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.steps, 6);
    assert_eq!(solution.iters, 7);
    assert_eq!(model.current(&state), [false, true, true]);
    assert!(state.boolean(BoolVar::new(0)));
    assert!(!state.needs_iteration);
}

#[test]
fn combinations_flip_the_pre_values() {
    // Starting from 110, the subset {0} gives 010.
    let model = Switches::consistent_at([false, true, false]);
    let mut system = model.system();
    let mut state = state_with([true, true, false]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert!(solution.is_converged());
    assert_eq!(solution.steps, 1);
}

#[test]
fn exhaustion_after_every_combination() {
    let model = Switches::never_consistent();
    let mut system = model.system();
    let mut state = state_with([false; 3]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert_eq!(solution.status, Status::Failed(Failure::SearchExhausted));
    assert!(solution.needs_iteration());
    assert_eq!(solution.steps, 7);
    assert_eq!(solution.iters, 8);
    assert!(state.needs_iteration);
}

#[test]
fn exhaustion_during_initialization_still_flags_iteration() {
    let model = Switches::never_consistent();
    let mut system = model.system();
    let mut state = state_with([true; 3]);
    state.initial = true;

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert!(solution.needs_iteration());
    assert!(state.needs_iteration);
}

#[test]
fn restarts_after_a_relation_change() {
    let model = Switches::consistent_at([false; 3]);
    model.relation_changes.set(1);
    let mut system = model.system();
    let mut state = state_with([false; 3]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert!(solution.is_converged());
    assert_eq!(solution.relation_restarts, 1);
    assert_eq!(solution.iters, 2);
    assert_eq!(solution.steps, 0);
    assert!(!state.relations_changed());
}

#[test]
fn relations_that_never_settle_fail() {
    let model = Switches::consistent_at([false; 3]);
    model.relation_changes.set(usize::MAX);
    let mut system = model.system();
    let mut state = state_with([false; 3]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert_eq!(solution.status, Status::Failed(Failure::RelationsDiverged));
    assert_eq!(solution.relation_restarts, MAX_MIXED_ITERATIONS + 1);
    assert_eq!(model.subsolves.get(), MAX_MIXED_ITERATIONS + 1);
}

#[test]
fn subsolve_failure_stops_the_search() {
    let model = Switches {
        subsolve: Subsolve::Failed,
        ..Switches::never_consistent()
    };
    let mut system = model.system();
    let mut state = state_with([false; 3]);

    let solution = solve_unobserved(&model, &mut system, &mut state).expect("known system");

    assert_eq!(solution.status, Status::Failed(Failure::SubsolveFailed));
    assert_eq!(solution.iters, 1);
    assert!(!solution.needs_iteration());
}

#[test]
fn observer_sees_each_iteration_and_can_stop() {
    let model = Switches::never_consistent();
    let mut system = model.system();
    let mut state = state_with([false; 3]);

    let mut seen = Vec::new();
    let observer = |event: &Event<'_>| {
        seen.push((event.iter, event.is_consistent()));
        (event.iter == 3).then_some(Action::StopEarly)
    };

    let solution = solve(&model, &mut system, &mut state, observer).expect("known system");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.steps, 2);
    assert_eq!(seen, vec![(1, false), (2, false), (3, false)]);
}

#[test]
fn model_errors_propagate() {
    let model = Switches::never_consistent();
    let mut system = MixedSystem::new(7, 0, model.vars.clone());
    let mut state = state_with([false; 3]);

    let result = solve_unobserved(&model, &mut system, &mut state);

    assert!(matches!(result, Err(Error::Model(_))));
}
