use thiserror::Error;

/// Configuration for the event core.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    num_event_limit: usize,
    abort_on_chattering: bool,
    step_size: f64,
}

/// Errors that can occur when validating an event core config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_event_limit must be at least one")]
    ZeroEventLimit,

    #[error("step_size must be finite and positive")]
    StepSize,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(100, false, 0.002).unwrap()
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// `num_event_limit` is the capacity of the chattering window and
    /// `step_size` the nominal integrator step the window span is compared
    /// against.
    ///
    /// # Errors
    ///
    /// Returns an error if the window capacity is zero or the step size is not
    /// finite and positive.
    pub fn new(
        num_event_limit: usize,
        abort_on_chattering: bool,
        step_size: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            num_event_limit,
            abort_on_chattering,
            step_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the config, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_event_limit == 0 {
            return Err(ConfigError::ZeroEventLimit);
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(ConfigError::StepSize);
        }
        Ok(())
    }

    /// Returns `self` with abort-on-chattering set to `abort`.
    #[must_use]
    pub fn with_abort_on_chattering(self, abort: bool) -> Self {
        Self {
            abort_on_chattering: abort,
            ..self
        }
    }

    /// Returns the capacity of the chattering window.
    #[must_use]
    pub fn num_event_limit(&self) -> usize {
        self.num_event_limit
    }

    /// Returns true if detected chattering aborts the run.
    #[must_use]
    pub fn abort_on_chattering(&self) -> bool {
        self.abort_on_chattering
    }

    /// Returns the nominal integrator step size.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }
}
