use serde::{Deserialize, Serialize};

use super::history::VelocityHistory;
use crate::store::Axis;

/// One mouse-wheel notch (or fraction of one) from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Signed, possibly fractional, wheel rotation
    pub rotation: f64,
    /// Lines per notch as configured by the OS
    pub scroll_amount: u32,
    /// Any modifier held while scrolling
    pub horizontal: bool,
}

impl WheelEvent {
    pub fn vertical(rotation: f64, scroll_amount: u32) -> Self {
        Self {
            rotation,
            scroll_amount,
            horizontal: false,
        }
    }

    pub fn horizontal(rotation: f64, scroll_amount: u32) -> Self {
        Self {
            rotation,
            scroll_amount,
            horizontal: true,
        }
    }
}

/// Velocity state shared by the estimator and the integrator
///
/// Velocity is signed and measured in offset units per millisecond.
#[derive(Debug, Clone, Default)]
pub struct VelocityState {
    pub(crate) velocity: f64,
    pub(crate) history: VelocityHistory,
    pub(crate) last_wheel_delta: f64,
    /// Set by wheel input, cleared when the host reports the scroll settled
    pub(crate) active: bool,
    pub(crate) axis: Axis,
}

impl VelocityState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn history(&self) -> &VelocityHistory {
        &self.history
    }

    #[inline]
    pub fn last_wheel_delta(&self) -> f64 {
        self.last_wheel_delta
    }

    #[inline]
    pub fn is_actively_scrolling(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Wheel input arrived: stop decaying and follow the event's axis
    pub fn begin_input(&mut self, horizontal: bool) {
        self.active = true;
        self.axis = Axis::from_modifiers(horizontal);
    }

    /// The host finished its scroll; let friction take over
    pub fn settle(&mut self) {
        self.active = false;
        self.history.clear();
    }

    /// Come to rest
    pub fn zero(&mut self) {
        self.velocity = 0.0;
        self.history.clear();
    }
}
