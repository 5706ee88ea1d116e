//! Per-tick decay and position delta

use smoothwheel_core::DecayTunables;

use super::state::VelocityState;

impl VelocityState {
    /// Advance one frame
    ///
    /// Applies friction when no wheel input is live, then returns the offset
    /// delta for this frame, or `None` once velocity has dropped below the
    /// threshold and been zeroed.
    pub fn advance(&mut self, tunables: &DecayTunables, millis_per_frame: f64) -> Option<f64> {
        if !self.active {
            // v' = v * e^(-friction * dt)
            self.velocity *= (-tunables.friction * millis_per_frame).exp();
        }

        if self.velocity.abs() >= tunables.threshold {
            Some(self.velocity * millis_per_frame)
        } else {
            self.zero();
            None
        }
    }
}

/// Offset after moving `delta` from `current`, rounded and kept non-negative
pub fn apply_delta(current: i32, delta: f64) -> i32 {
    let next = (f64::from(current) + delta).round();
    next.clamp(0.0, f64::from(i32::MAX)) as i32
}
