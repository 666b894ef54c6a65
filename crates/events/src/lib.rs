//! The hybrid discrete/continuous event core.
//!
//! Once per integration step the driver hands its [`SimulationState`] to an
//! [`EventCore`], which decides whether a time event, a state event, or
//! neither occurred, locates state events in time, and applies them.
//!
//! # Modules
//!
//! - [`zero_crossing`]: current and pre values of every zero crossing and
//!   sign-flip detection
//! - [`schedule`]: next activation times of periodic sample events
//! - [`root_finder`]: bisection of a step interval down to the crossing time
//! - [`chattering`]: sliding window of recent state events
//! - [`mixed`]: combinatorial search for boolean/continuous subsystems
//!
//! # Driving a step
//!
//! ```ignore
//! use seam_events::{EventCore, StepEvent};
//!
//! core.initialize(&model, &mut state, start, stop)?;
//! while state.time < stop {
//!     let h = core.align_step(state.time, h_nominal).unwrap_or(h_nominal);
//!     state.store_old_values();
//!     integrator.step(&mut model, &mut state, h)?;
//!
//!     core.update_zero_crossings(&model, &mut state)?;
//!     if core.classify_step(&mut model, &mut state)? != StepEvent::None {
//!         core.apply_event(&mut model, &mut state)?;
//!     }
//!     core.accept_step();
//! }
//! ```
//!
//! [`SimulationState`]: seam_core::SimulationState

mod candidates;
mod config;
mod engine;
mod error;

pub mod chattering;
pub mod mixed;
pub mod root_finder;
pub mod schedule;
pub mod zero_crossing;

pub use candidates::EventCandidateSet;
pub use config::{Config, ConfigError};
pub use engine::{EventCore, EventStats, StepEvent};
pub use error::Error;
