pub mod config;
pub mod display;
pub mod error;

pub use config::{
    AppConfig, DecayTunables, DisplayConfig, ScrollTunables, Tunable, TunableSource,
    WheelTunables,
};
pub use display::{DisplayInfo, FixedDisplays, FrameClock};
pub use error::{Error, Result};
