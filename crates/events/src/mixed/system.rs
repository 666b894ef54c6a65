use seam_core::{BoolVar, SimulationState};

/// A subsystem coupling boolean iteration variables with a continuous part.
///
/// Created once per subsystem at model setup and reused for every solve.
/// The iteration variables are indices into the state's boolean vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedSystem {
    id: usize,
    equation_index: usize,
    vars: Vec<BoolVar>,
    pub(super) pre: Vec<bool>,
    pub(super) before: Vec<bool>,
    pub(super) after: Vec<bool>,
    pub(super) search: Vec<bool>,
}

impl MixedSystem {
    /// Creates a subsystem.
    ///
    /// `id` identifies the subsystem to the model callbacks and
    /// `equation_index` names it in diagnostics.
    #[must_use]
    pub fn new(id: usize, equation_index: usize, vars: Vec<BoolVar>) -> Self {
        let size = vars.len();
        Self {
            id,
            equation_index,
            vars,
            pre: vec![false; size],
            before: vec![false; size],
            after: vec![false; size],
            search: vec![false; size],
        }
    }

    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn equation_index(&self) -> usize {
        self.equation_index
    }

    /// Returns the iteration variables.
    #[must_use]
    pub fn vars(&self) -> &[BoolVar] {
        &self.vars
    }

    /// Returns the number of iteration variables.
    #[must_use]
    pub fn size(&self) -> usize {
        self.vars.len()
    }

    /// Records the iteration variables as the pre-values of this solve and
    /// resets the search vector.
    pub(super) fn start(&mut self, state: &SimulationState) {
        read(&self.vars, state, &mut self.pre);
        self.search.fill(false);
    }

    pub(super) fn read_before(&mut self, state: &SimulationState) {
        read(&self.vars, state, &mut self.before);
    }

    pub(super) fn read_after(&mut self, state: &SimulationState) {
        read(&self.vars, state, &mut self.after);
    }

    /// Sets every iteration variable to its pre-value flipped where the
    /// search vector is set.
    pub(super) fn apply_search(&self, state: &mut SimulationState) {
        for ((&var, &pre), &flip) in self.vars.iter().zip(&self.pre).zip(&self.search) {
            state.set_boolean(var, pre != flip);
        }
    }
}

fn read(vars: &[BoolVar], state: &SimulationState, buffer: &mut [bool]) {
    for (value, &var) in buffer.iter_mut().zip(vars) {
        *value = state.boolean(var);
    }
}
