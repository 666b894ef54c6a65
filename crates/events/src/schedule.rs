//! Time-event scheduling for periodic sample events.

use log::{debug, info};
use seam_core::SampleEvent;

/// Tolerance used when comparing the current time with sample activation
/// times, so round-off neither skips nor repeats a sample boundary.
pub const SAMPLE_EPS: f64 = 1e-14;

/// The sample events of a model and the nearest upcoming activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    samples: Vec<SampleEvent>,
    next_sample_event: f64,
    activated: bool,
}

impl Schedule {
    /// Creates a schedule over the given sample events.
    ///
    /// No sample is due until [`Schedule::init`] is called.
    pub fn new<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = SampleEvent>,
    {
        Self {
            samples: samples.into_iter().collect(),
            next_sample_event: f64::INFINITY,
            activated: false,
        }
    }

    /// Returns the sample events.
    #[must_use]
    pub fn samples(&self) -> &[SampleEvent] {
        &self.samples
    }

    /// Returns the earliest upcoming activation time.
    #[must_use]
    pub fn next_sample_event(&self) -> f64 {
        self.next_sample_event
    }

    /// Returns true if the current step was aligned to a sample activation.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Computes the first activation of every sample for a simulation over
    /// `[start_time, stop_time]`.
    ///
    /// Without any sample the next event is placed at `stop_time + 1.0`, past
    /// the end of the simulation. Calling this again with the same arguments
    /// gives the same activation times.
    pub fn init(&mut self, start_time: f64, stop_time: f64) {
        for sample in &mut self.samples {
            sample.reset(start_time);
        }
        self.activated = false;
        self.next_sample_event = self.earliest().unwrap_or(stop_time + 1.0);

        if self.next_sample_event > stop_time {
            debug!("there are no sample events before t = {stop_time}");
        } else {
            debug!("first sample event at t = {}", self.next_sample_event);
        }
    }

    /// Shrinks the step so it ends exactly on the next sample activation.
    ///
    /// If the next activation lies within
    /// `[current_time, current_time + step_size + SAMPLE_EPS]`, the schedule
    /// is marked activated for this step and the shortened step size is
    /// returned. Otherwise the schedule is unchanged and `None` is returned.
    pub fn align_step(&mut self, current_time: f64, step_size: f64) -> Option<f64> {
        let step_end = current_time + step_size;
        let next = self.next_sample_event;

        if next > step_end + SAMPLE_EPS || next < current_time {
            return None;
        }

        let aligned = next - current_time;
        self.activated = true;
        info!("adjusting step size to {aligned:.15} at t = {current_time:.15} for the sample event at t = {next:.15}");
        Some(aligned)
    }

    /// Activates every sample due at `time` and returns how many fired.
    pub(crate) fn fire(&mut self, time: f64) -> usize {
        let mut fired = 0;
        for sample in &mut self.samples {
            if sample.next_activation() <= time + SAMPLE_EPS {
                sample.activate();
                fired += 1;
                info!(
                    "[{}] sample({}, {})",
                    sample.index(),
                    sample.start(),
                    sample.interval()
                );
            }
        }
        fired
    }

    /// Completes every fired sample, recomputes the next activation, and
    /// clears the activated flag. Returns how many samples were completed.
    pub(crate) fn advance(&mut self) -> usize {
        let completed = self
            .samples
            .iter_mut()
            .map(SampleEvent::complete)
            .filter(|&done| done)
            .count();

        if let Some(earliest) = self.earliest() {
            self.next_sample_event = earliest;
        }
        self.activated = false;

        debug!("next sample event at t = {}", self.next_sample_event);
        completed
    }

    fn earliest(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(SampleEvent::next_activation)
            .reduce(f64::min)
    }
}
