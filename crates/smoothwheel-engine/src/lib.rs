//! Inertial mouse-wheel scrolling engine
//!
//! Wheel events are turned into a smoothed velocity which a fixed-rate timer
//! integrates into scroll offsets, decaying exponentially once input stops.
//!
//! # Layout
//!
//! - `store` - The host scroll store the engine writes offsets into
//! - `velocity` - Velocity state, rolling history, estimator and integrator
//! - `engine` - `ScrollEngine`, the per-surface entry points
//! - `timer` - Fixed-rate frame timer
//! - `session` - Lifecycle and dispatch loop for one attached surface
//!
//! # Usage
//!
//! ```ignore
//! use smoothwheel_core::{FrameClock, ScrollTunables};
//! use smoothwheel_engine::{MemoryStore, ScrollEngine, WheelEvent};
//!
//! let mut store = MemoryStore::default();
//! let clock = FrameClock::new(60)?;
//! let mut engine = ScrollEngine::attach(&mut store, ScrollTunables::default(), clock);
//!
//! engine.on_wheel_event(&WheelEvent::vertical(1.0, 3))?;
//!
//! // once per frame
//! engine.on_timer_tick(&mut store)?;
//! ```

pub mod engine;
pub mod session;
pub mod store;
pub mod timer;
pub mod velocity;

pub use engine::ScrollEngine;
pub use session::{ScrollSession, SurfaceEvent};
pub use store::{Axis, MemoryStore, ScrollStore};
pub use timer::FrameTimer;
pub use velocity::{VelocityHistory, VelocityState, WheelEvent, WheelOutcome};
