//! Wheel events into a smoothed, clamped velocity

use smoothwheel_core::WheelTunables;

use super::state::VelocityState;

/// What a wheel event did to the velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Direction changed (or first event): momentum discarded
    Reversed,
    /// Increment below threshold: nothing changed
    Filtered,
    /// Velocity updated
    Moving,
    /// Velocity fell below threshold after clamping and was zeroed
    Stopped,
}

impl VelocityState {
    /// Fold one wheel event into the velocity
    ///
    /// Order matters for feel: average, then acceleration clamp, then speed
    /// clamp, then threshold zeroing.
    pub fn apply_wheel(
        &mut self,
        rotation: f64,
        scroll_amount: u32,
        tunables: &WheelTunables,
        millis_per_frame: f64,
    ) -> WheelOutcome {
        // a zero previous delta never counts as the same direction
        let same_direction = self.last_wheel_delta * rotation > 0.0;
        self.last_wheel_delta = rotation;

        if !same_direction {
            self.zero();
            return WheelOutcome::Reversed;
        }

        let delta_v =
            f64::from(scroll_amount) * rotation * tunables.multiplier / millis_per_frame;
        if delta_v.abs() < tunables.threshold {
            return WheelOutcome::Filtered;
        }

        let old_velocity = self.velocity;
        self.history.push(self.velocity + delta_v);
        self.velocity = self.history.average();

        let acc = (self.velocity - old_velocity) / millis_per_frame;
        if acc.abs() > tunables.acceleration_limit {
            self.velocity =
                old_velocity + tunables.acceleration_limit * millis_per_frame * acc.signum();
        }

        if self.velocity.abs() > tunables.speed_limit {
            self.velocity = tunables.speed_limit * self.velocity.signum();
        }

        if self.velocity.abs() < tunables.threshold {
            self.zero();
            return WheelOutcome::Stopped;
        }

        WheelOutcome::Moving
    }
}
