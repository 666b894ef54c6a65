use std::error::Error as StdError;

/// Errors that can occur during a mixed-system search.
///
/// Failing to converge is not an error; see [`Status`](super::Status).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }
}
