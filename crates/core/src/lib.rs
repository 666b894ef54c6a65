//! Core traits and types for the Seam hybrid event core.
//!
//! This crate defines the shared abstractions that the event machinery and
//! generated models build on:
//!
//! - [`SimulationState`]: the owned state arena (time, reals, booleans,
//!   relations) that the integration driver hands to the event core
//! - [`BoolVar`]: a typed index into the boolean part of the state
//! - [`Sign`]: the sign class of a zero-crossing value
//! - [`SampleEvent`]: a periodic time event definition and its activation
//! - [`HybridModel`], [`MixedModel`]: the model callbacks the event core and
//!   the mixed-system resolver invoke
//! - [`Observer`]: receives solver events and optionally returns control actions

mod model;
mod observer;
mod sample;
mod sign;
mod state;

pub use model::{HybridModel, MixedModel, Subsolve, ZeroCrossingInfo};
pub use observer::Observer;
pub use sample::{SampleError, SampleEvent};
pub use sign::Sign;
pub use state::{BoolVar, SimulationState};
