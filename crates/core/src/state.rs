/// Typed index of a boolean variable in [`SimulationState::booleans`].
///
/// Mixed systems hold `BoolVar`s rather than references, so the state arena
/// can be reallocated without invalidating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoolVar(usize);

impl BoolVar {
    /// Creates an index for the boolean variable at position `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the position of the variable in the boolean vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The simulated state at the current time.
///
/// The first [`state_count`](Self::state_count) entries of `reals` are the
/// continuous states advanced by the integrator; the remaining entries are
/// algebraic or discrete reals computed by the model.
///
/// The integration driver owns the state. The event core borrows it mutably
/// for the duration of event resolution and leaves time and states consistent
/// before returning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationState {
    /// Current simulation time.
    pub time: f64,
    /// Real variables; continuous states first.
    pub reals: Vec<f64>,
    /// Boolean variables.
    pub booleans: Vec<bool>,
    /// Boolean values at the last synchronization point.
    pub booleans_pre: Vec<bool>,
    /// Current relation values, written by the model.
    pub relations: Vec<bool>,
    /// Relation values stored for change detection within an iteration.
    pub relations_stored: Vec<bool>,
    /// Relation values at the last synchronization point.
    pub relations_pre: Vec<bool>,
    /// Time of the last accepted step.
    pub old_time: f64,
    /// Real variables of the last accepted step.
    pub old_reals: Vec<f64>,
    /// True while the model is being initialized.
    pub initial: bool,
    /// Set when a discrete solve ended without a consistent solution.
    pub needs_iteration: bool,
    state_count: usize,
}

impl SimulationState {
    /// Creates a state at `time` with the given reals, of which the first
    /// `state_count` are continuous states.
    ///
    /// The old copies start equal to the current values.
    ///
    /// # Panics
    ///
    /// Panics if `reals` holds fewer than `state_count` values.
    #[must_use]
    pub fn new(time: f64, reals: Vec<f64>, state_count: usize) -> Self {
        assert!(
            reals.len() >= state_count,
            "state has {} reals but {state_count} continuous states",
            reals.len()
        );

        Self {
            time,
            old_time: time,
            old_reals: reals.clone(),
            reals,
            state_count,
            ..Self::default()
        }
    }

    /// Returns `self` with the given boolean variables.
    ///
    /// The boolean pre-values start equal to the given values.
    #[must_use]
    pub fn with_booleans(self, booleans: Vec<bool>) -> Self {
        Self {
            booleans_pre: booleans.clone(),
            booleans,
            ..self
        }
    }

    /// Returns `self` with `count` relations, all initially false.
    #[must_use]
    pub fn with_relations(self, count: usize) -> Self {
        Self {
            relations: vec![false; count],
            relations_stored: vec![false; count],
            relations_pre: vec![false; count],
            ..self
        }
    }

    /// Returns the number of continuous states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Returns the continuous states.
    #[must_use]
    pub fn states(&self) -> &[f64] {
        &self.reals[..self.state_count]
    }

    /// Returns the continuous states of the last accepted step.
    #[must_use]
    pub fn old_states(&self) -> &[f64] {
        &self.old_reals[..self.state_count]
    }

    /// Overwrites the continuous states.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly one value per continuous state.
    pub fn set_states(&mut self, values: &[f64]) {
        assert_eq!(
            values.len(),
            self.state_count,
            "continuous state vector has the wrong length"
        );
        self.reals[..self.state_count].copy_from_slice(values);
    }

    /// Returns the value of a boolean variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of range.
    #[must_use]
    pub fn boolean(&self, var: BoolVar) -> bool {
        self.booleans[var.index()]
    }

    /// Sets the value of a boolean variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of range.
    pub fn set_boolean(&mut self, var: BoolVar, value: bool) {
        self.booleans[var.index()] = value;
    }

    /// Returns the pre-value of a boolean variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of range.
    #[must_use]
    pub fn boolean_pre(&self, var: BoolVar) -> bool {
        self.booleans_pre[var.index()]
    }

    /// Copies the current booleans into their pre-values.
    pub fn store_pre_values(&mut self) {
        self.booleans_pre.clone_from(&self.booleans);
    }

    /// Returns true if any relation differs from its stored value.
    #[must_use]
    pub fn relations_changed(&self) -> bool {
        self.relations != self.relations_stored
    }

    /// Stores the current relations for later change detection.
    pub fn store_relations(&mut self) {
        self.relations_stored.clone_from(&self.relations);
    }

    /// Copies the current relations into their pre-values.
    pub fn update_relations_pre(&mut self) {
        self.relations_pre.clone_from(&self.relations);
    }

    /// Records the current time and reals as the last accepted step.
    ///
    /// The driver calls this before advancing the integrator, so the old
    /// copies bracket the next step from the left.
    pub fn store_old_values(&mut self) {
        self.old_time = self.time;
        self.old_reals.clone_from(&self.reals);
    }
}
