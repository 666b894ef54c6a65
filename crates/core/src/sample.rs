use thiserror::Error;

/// A periodic time event that activates at `start + k * interval`.
///
/// The event tracks its next activation time and whether it is firing in the
/// current event iteration. Models read [`SampleEvent::is_active`] while the
/// discrete system is updated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleEvent {
    index: usize,
    start: f64,
    interval: f64,
    next_activation: f64,
    active: bool,
}

/// Error returned when constructing an invalid [`SampleEvent`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SampleError {
    #[error("sample start must be finite, got {0}")]
    NonFiniteStart(f64),

    #[error("sample interval must be finite and positive, got {0}")]
    Interval(f64),
}

impl SampleEvent {
    /// Creates a sample event with a model-assigned `index`.
    ///
    /// The next activation starts at `start` until the schedule is initialized.
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] if `start` is not finite or `interval` is not
    /// finite and strictly positive.
    pub fn new(index: usize, start: f64, interval: f64) -> Result<Self, SampleError> {
        if !start.is_finite() {
            return Err(SampleError::NonFiniteStart(start));
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(SampleError::Interval(interval));
        }

        Ok(Self {
            index,
            start,
            interval,
            next_activation: start,
            active: false,
        })
    }

    /// Returns the model-assigned index used in diagnostics.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the time of the first activation.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the repetition interval.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Returns the time of the next activation.
    #[must_use]
    pub fn next_activation(&self) -> f64 {
        self.next_activation
    }

    /// Returns true if the event fires in the current event iteration.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the first activation time at or after `start_time`.
    ///
    /// This is `start` if the sample has not started yet, otherwise the
    /// smallest `start + k * interval` that is not before `start_time`.
    #[must_use]
    pub fn first_activation_from(&self, start_time: f64) -> f64 {
        if start_time < self.start {
            self.start
        } else {
            let periods = ((start_time - self.start) / self.interval).ceil();
            self.start + periods * self.interval
        }
    }

    /// Resets the event for a simulation starting at `start_time`.
    pub fn reset(&mut self, start_time: f64) {
        self.next_activation = self.first_activation_from(start_time);
        self.active = false;
    }

    /// Marks the event as firing in the current event iteration.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Completes a firing: clears the active flag and advances the next
    /// activation by one interval.
    ///
    /// Returns false, leaving the event unchanged, if it was not active.
    pub fn complete(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.next_activation += self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_invalid_definitions() {
        assert!(matches!(
            SampleEvent::new(0, f64::NAN, 1.0),
            Err(SampleError::NonFiniteStart(_))
        ));
        assert!(matches!(
            SampleEvent::new(0, 0.0, 0.0),
            Err(SampleError::Interval(_))
        ));
        assert!(matches!(
            SampleEvent::new(0, 0.0, -1.0),
            Err(SampleError::Interval(_))
        ));
        assert!(matches!(
            SampleEvent::new(0, 0.0, f64::INFINITY),
            Err(SampleError::Interval(_))
        ));
    }

    #[test]
    fn first_activation_aligns_to_grid() {
        let sample = SampleEvent::new(1, 0.0, 1.0).expect("valid sample");
        assert_relative_eq!(sample.first_activation_from(2.5), 3.0);
        assert_relative_eq!(sample.first_activation_from(3.0), 3.0);
        assert_relative_eq!(sample.first_activation_from(0.0), 0.0);
    }

    #[test]
    fn first_activation_before_start_is_start() {
        let sample = SampleEvent::new(1, 4.0, 0.5).expect("valid sample");
        assert_relative_eq!(sample.first_activation_from(1.0), 4.0);
    }

    #[test]
    fn complete_advances_only_active_events() {
        let mut sample = SampleEvent::new(7, 0.0, 0.25).expect("valid sample");
        sample.reset(0.1);
        assert_relative_eq!(sample.next_activation(), 0.25);

        assert!(!sample.complete());
        assert_relative_eq!(sample.next_activation(), 0.25);

        sample.activate();
        assert!(sample.is_active());
        assert!(sample.complete());
        assert!(!sample.is_active());
        assert_relative_eq!(sample.next_activation(), 0.5);
    }
}
