//! Velocity estimation and integration
//!
//! - `history` - Bounded rolling window of recent velocities
//! - `state` - The shared per-surface velocity state
//! - `estimator` - Wheel events into a smoothed, clamped velocity
//! - `integrator` - Per-tick decay and offset delta

pub mod estimator;
pub mod history;
pub mod integrator;
pub mod state;

pub use estimator::WheelOutcome;
pub use history::{VelocityHistory, HISTORY_CAPACITY};
pub use integrator::apply_delta;
pub use state::{VelocityState, WheelEvent};
