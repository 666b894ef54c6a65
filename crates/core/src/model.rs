use crate::{SampleEvent, SimulationState};

/// Human-readable description of a zero-crossing expression.
///
/// Used only for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroCrossingInfo<'a> {
    /// The expression text, e.g. `"h < 0.0"`.
    pub description: &'a str,
    /// Indices of the equations the expression appears in.
    pub equations: &'a [usize],
}

/// The model callbacks invoked by the event core.
///
/// A hybrid model evaluates its zero-crossing expressions on a state and
/// re-resolves its discrete and continuous equations when an event is
/// applied. Implementations are usually generated from a model description.
pub trait HybridModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the number of zero-crossing expressions.
    fn zero_crossing_count(&self) -> usize;

    /// Evaluates every zero-crossing expression on `state` into `values`.
    ///
    /// `values` has exactly [`zero_crossing_count`](Self::zero_crossing_count)
    /// entries. The state is mutable so the model can first compute the
    /// equations the expressions depend on.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the expressions cannot be evaluated.
    fn zero_crossings(
        &self,
        state: &mut SimulationState,
        values: &mut [f64],
    ) -> Result<(), Self::Error>;

    /// Describes the zero crossing at `index` for diagnostics.
    fn zero_crossing_info(&self, index: usize) -> ZeroCrossingInfo<'_>;

    /// Refreshes externally driven inputs for the current state time.
    ///
    /// Called before each zero-crossing evaluation inside the root finder.
    /// The default implementation does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the inputs cannot be refreshed.
    fn update_inputs(&self, _state: &mut SimulationState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Re-resolves the whole discrete/algebraic system after an event.
    ///
    /// `samples` holds the schedule's sample events; those with
    /// [`SampleEvent::is_active`] set fire in this event iteration. Mixed
    /// subsystems are typically resolved from here.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the discrete system cannot be evaluated.
    fn update_discrete_system(
        &mut self,
        state: &mut SimulationState,
        samples: &[SampleEvent],
    ) -> Result<(), Self::Error>;

    /// Re-evaluates the continuous part of the system at the current state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the continuous system cannot be evaluated.
    fn update_continuous_system(&mut self, state: &mut SimulationState) -> Result<(), Self::Error>;

    /// Records the current relations as their pre-values.
    ///
    /// The default implementation copies [`SimulationState::relations`] into
    /// [`SimulationState::relations_pre`].
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the relations cannot be updated.
    fn update_relations_pre(&mut self, state: &mut SimulationState) -> Result<(), Self::Error> {
        state.update_relations_pre();
        Ok(())
    }
}

/// Outcome of a continuous subsolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsolve {
    /// The continuous subpart was solved.
    Solved,
    /// The continuous subpart could not be solved.
    Failed,
}

/// The per-subsystem callbacks used by the mixed-system resolver.
///
/// A mixed subsystem couples boolean switch variables with a continuous
/// residual. `system` identifies the subsystem within the model.
pub trait MixedModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Solves the continuous part of subsystem `system` for the current
    /// boolean configuration.
    ///
    /// A numerical failure is reported as [`Subsolve::Failed`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the subsystem cannot be evaluated at all.
    fn solve_continuous_subpart(
        &self,
        system: usize,
        state: &mut SimulationState,
    ) -> Result<Subsolve, Self::Error>;

    /// Recomputes the boolean iteration variables of subsystem `system` from
    /// the continuous solution, updating the state's relations.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the expressions cannot be evaluated.
    fn update_iteration_expressions(
        &self,
        system: usize,
        state: &mut SimulationState,
    ) -> Result<(), Self::Error>;
}
