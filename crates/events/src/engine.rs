mod dispatch;
mod handle;


use log::debug;
use seam_core::{HybridModel, SampleEvent, SimulationState};

use crate::{
    Config, EventCandidateSet, Error, chattering::ChatteringWindow, schedule::Schedule,
    zero_crossing::ZeroCrossings,
};

/// What happened within the last integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// No event; the step can be accepted as is.
    None,

    /// A sample event is due at the end of the step.
    ///
    /// Takes priority over a coincident state event, since applying a time
    /// event re-resolves the whole discrete system anyway.
    Time,

    /// A zero crossing flipped sign within the step.
    State,
}

/// Running event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    /// Number of applied state events.
    pub state_events: usize,

    /// Number of applied time events in which at least one sample fired.
    pub sample_events: usize,

    /// Number of chattering warnings logged.
    pub chattering_warnings: usize,
}

/// The event core of one simulation run.
///
/// Owns the zero-crossing tracker, the sample schedule, and the chattering
/// window, and borrows the model and state for each call.
#[derive(Debug, Clone)]
pub struct EventCore {
    config: Config,
    zero_crossings: ZeroCrossings,
    schedule: Schedule,
    chattering: ChatteringWindow,
    candidates: EventCandidateSet,
    event_time: f64,
    solver_root_finding: bool,
    stats: EventStats,
}

impl EventCore {
    /// Creates an event core for a model with `zero_crossing_count` zero
    /// crossings and the given sample events.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the config does not validate.
    pub fn new<I>(config: Config, zero_crossing_count: usize, samples: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = SampleEvent>,
    {
        config.validate()?;

        Ok(Self {
            config,
            zero_crossings: ZeroCrossings::new(zero_crossing_count),
            schedule: Schedule::new(samples),
            chattering: ChatteringWindow::new(config.num_event_limit()),
            candidates: EventCandidateSet::new(),
            event_time: 0.0,
            solver_root_finding: false,
            stats: EventStats::default(),
        })
    }

    /// Returns `self` with integrator root finding set to `enabled`.
    ///
    /// When the integrator locates zero crossings itself, detected state
    /// events are applied at the current time without bisection.
    #[must_use]
    pub fn with_solver_root_finding(self, enabled: bool) -> Self {
        Self {
            solver_root_finding: enabled,
            ..self
        }
    }

    /// Prepares a run over `[start_time, stop_time]`.
    ///
    /// Schedules the first activation of every sample event, resets the
    /// counters and the chattering window, and synchronizes the zero-crossing
    /// pre-values with `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if the zero crossings cannot be evaluated.
    pub fn initialize<M: HybridModel>(
        &mut self,
        model: &M,
        state: &mut SimulationState,
        start_time: f64,
        stop_time: f64,
    ) -> Result<(), Error> {
        debug!("initializing event handling for [{start_time}, {stop_time}]");

        self.schedule.init(start_time, stop_time);
        self.chattering = ChatteringWindow::new(self.config.num_event_limit());
        self.candidates.clear();
        self.event_time = start_time;
        self.stats = EventStats::default();

        self.zero_crossings
            .save_after_event(model, state)
            .map_err(Error::model)
    }

    /// Shrinks the next step so it lands on a due sample event.
    ///
    /// See [`Schedule::align_step`].
    pub fn align_step(&mut self, current_time: f64, step_size: f64) -> Option<f64> {
        self.schedule.align_step(current_time, step_size)
    }

    /// Evaluates the zero crossings at the end of an integration step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Model`] if the zero crossings cannot be evaluated.
    pub fn update_zero_crossings<M: HybridModel>(
        &mut self,
        model: &M,
        state: &mut SimulationState,
    ) -> Result<(), Error> {
        self.zero_crossings
            .evaluate(model, state)
            .map_err(Error::model)
    }

    /// Accepts the step, making the current zero-crossing values the
    /// reference for the next one.
    pub fn accept_step(&mut self) {
        self.zero_crossings.synchronize();
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn zero_crossings(&self) -> &ZeroCrossings {
        &self.zero_crossings
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub fn chattering(&self) -> &ChatteringWindow {
        &self.chattering
    }

    /// Returns the resolved candidates of the pending state event.
    #[must_use]
    pub fn candidates(&self) -> &EventCandidateSet {
        &self.candidates
    }

    /// Returns the time of the last classified event.
    #[must_use]
    pub fn event_time(&self) -> f64 {
        self.event_time
    }

    #[must_use]
    pub fn stats(&self) -> EventStats {
        self.stats
    }
}
