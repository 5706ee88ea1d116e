//! Animation frame clock derived from the attached displays.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{Error, Result};

/// Source of display refresh rates
pub trait DisplayInfo {
    /// Refresh rate in Hz of every attached display. Unknown rates are 0.
    fn refresh_rates(&self) -> Vec<u32>;
}

/// A fixed list of refresh rates, for tests and configured overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedDisplays(pub Vec<u32>);

impl DisplayInfo for FixedDisplays {
    fn refresh_rates(&self) -> Vec<u32> {
        self.0.clone()
    }
}

/// Fixed animation rate shared by the estimator, the integrator and the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    frames_per_second: u32,
    millis_per_frame: u64,
}

impl FrameClock {
    pub fn new(frames_per_second: u32) -> Result<Self> {
        if frames_per_second == 0 {
            return Err(Error::InvalidFrameRate(frames_per_second));
        }
        // whole-millisecond timer resolution, never below 1ms
        let millis_per_frame = (1000 / u64::from(frames_per_second)).max(1);
        Ok(Self {
            frames_per_second,
            millis_per_frame,
        })
    }

    /// Use the fastest attached display, or `fallback_hz` when none reports a rate
    pub fn detect<D: DisplayInfo + ?Sized>(displays: &D, fallback_hz: u32) -> Result<Self> {
        let highest = displays.refresh_rates().into_iter().max().unwrap_or(0);

        let clock = if highest == 0 {
            warn!(
                "No display reported a refresh rate, animating at {} FPS",
                fallback_hz
            );
            Self::new(fallback_hz)?
        } else {
            Self::new(highest)?
        };

        debug!("Set scrolling to {} FPS", clock.frames_per_second);
        Ok(clock)
    }

    #[inline]
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Frame interval in milliseconds as used by the velocity math
    #[inline]
    pub fn millis(&self) -> f64 {
        self.millis_per_frame as f64
    }

    /// Period of the animation timer
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.millis_per_frame)
    }
}
