use std::error::Error as StdError;

use thiserror::Error;

use crate::ConfigError;

/// Errors that can occur while detecting, locating, or applying events.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error(
        "chattering at t = {to}: {count} state events in [{from}, {to}], \
         less than the step size {step_size}, last caused by zero crossing {index} ({description})"
    )]
    Chattering {
        /// Index of the most recent offending zero crossing.
        index: usize,
        /// Description of that zero crossing.
        description: String,
        /// Timestamp of the oldest event in the window.
        from: f64,
        /// Timestamp of the newest event in the window.
        to: f64,
        /// Number of state events in the window.
        count: usize,
        /// The nominal step size the window span was compared against.
        step_size: f64,
    },
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }
}
