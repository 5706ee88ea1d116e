use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::watch;

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollTunables,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Display settings used to derive the animation frame rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Force a refresh rate instead of asking the attached displays
    #[serde(default)]
    pub refresh_rate_hz: Option<u32>,
    /// Rate used when no display reports a usable refresh rate
    #[serde(default = "default_fallback_refresh_rate")]
    pub fallback_refresh_rate_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: None,
            fallback_refresh_rate_hz: default_fallback_refresh_rate(),
        }
    }
}

/// The five numeric knobs that shape how scrolling feels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tunable {
    Threshold,
    SpeedLimit,
    AccelerationLimit,
    Multiplier,
    Friction,
}

impl Tunable {
    pub const ALL: [Tunable; 5] = [
        Tunable::Threshold,
        Tunable::SpeedLimit,
        Tunable::AccelerationLimit,
        Tunable::Multiplier,
        Tunable::Friction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tunable::Threshold => "threshold",
            Tunable::SpeedLimit => "speed_limit",
            Tunable::AccelerationLimit => "acceleration_limit",
            Tunable::Multiplier => "multiplier",
            Tunable::Friction => "friction",
        }
    }

    /// Check a raw value against the range this key accepts
    pub fn validate(self, value: f64) -> Result<f64> {
        let reason = if !value.is_finite() {
            Some("must be finite")
        } else {
            match self {
                Tunable::Threshold | Tunable::Friction if value < 0.0 => {
                    Some("must not be negative")
                }
                Tunable::SpeedLimit | Tunable::AccelerationLimit if value <= 0.0 => {
                    Some("must be positive")
                }
                Tunable::Multiplier if value == 0.0 => Some("must not be zero"),
                _ => None,
            }
        };

        match reason {
            Some(reason) => Err(Error::InvalidTunable {
                key: self,
                value,
                reason,
            }),
            None => Ok(value),
        }
    }
}

impl fmt::Display for Tunable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scroll feel configuration
///
/// Velocities are in offset units per millisecond, friction is the decay
/// rate per millisecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollTunables {
    /// Minimum |velocity| (or per-event velocity increment) that counts as motion
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Maximum |velocity|
    #[serde(default = "default_speed_limit")]
    pub speed_limit: f64,
    /// Maximum velocity change per millisecond from a single wheel event
    #[serde(default = "default_acceleration_limit")]
    pub acceleration_limit: f64,
    /// Scale applied to raw wheel rotation
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Exponential decay rate once input stops
    #[serde(default = "default_friction")]
    pub friction: f64,
}

impl Default for ScrollTunables {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            speed_limit: default_speed_limit(),
            acceleration_limit: default_acceleration_limit(),
            multiplier: default_multiplier(),
            friction: default_friction(),
        }
    }
}

impl ScrollTunables {
    fn raw(&self, key: Tunable) -> f64 {
        match key {
            Tunable::Threshold => self.threshold,
            Tunable::SpeedLimit => self.speed_limit,
            Tunable::AccelerationLimit => self.acceleration_limit,
            Tunable::Multiplier => self.multiplier,
            Tunable::Friction => self.friction,
        }
    }

    /// Validate every value, reporting the first bad key
    pub fn validate(&self) -> Result<()> {
        for key in Tunable::ALL {
            key.validate(self.raw(key))?;
        }
        Ok(())
    }
}

/// Where the engine reads its tunables from
///
/// Implementations are queried on every wheel event and every tick, so a
/// source that changes underneath the engine takes effect immediately.
/// A missing or out-of-range value is an error, never a silent zero.
pub trait TunableSource {
    fn get(&self, key: Tunable) -> Result<f64>;
}

impl TunableSource for ScrollTunables {
    fn get(&self, key: Tunable) -> Result<f64> {
        key.validate(self.raw(key))
    }
}

/// Live tuning: the host keeps the sender and publishes new values
impl TunableSource for watch::Receiver<ScrollTunables> {
    fn get(&self, key: Tunable) -> Result<f64> {
        self.borrow().get(key)
    }
}

impl TunableSource for HashMap<Tunable, f64> {
    fn get(&self, key: Tunable) -> Result<f64> {
        let value = HashMap::get(self, &key)
            .copied()
            .ok_or(Error::MissingTunable(key))?;
        key.validate(value)
    }
}

impl<T: TunableSource + ?Sized> TunableSource for &T {
    fn get(&self, key: Tunable) -> Result<f64> {
        (**self).get(key)
    }
}

impl<T: TunableSource + ?Sized> TunableSource for Arc<T> {
    fn get(&self, key: Tunable) -> Result<f64> {
        (**self).get(key)
    }
}

/// Tunables consumed by a wheel event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTunables {
    pub threshold: f64,
    pub speed_limit: f64,
    pub acceleration_limit: f64,
    pub multiplier: f64,
}

impl WheelTunables {
    pub fn read<S: TunableSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            threshold: source.get(Tunable::Threshold)?,
            speed_limit: source.get(Tunable::SpeedLimit)?,
            acceleration_limit: source.get(Tunable::AccelerationLimit)?,
            multiplier: source.get(Tunable::Multiplier)?,
        })
    }
}

/// Tunables consumed by a timer tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTunables {
    pub threshold: f64,
    pub friction: f64,
}

impl DecayTunables {
    pub fn read<S: TunableSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            threshold: source.get(Tunable::Threshold)?,
            friction: source.get(Tunable::Friction)?,
        })
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_refresh_rate() -> u32 {
    60
}

fn default_threshold() -> f64 {
    0.1
}

fn default_speed_limit() -> f64 {
    15.0
}

fn default_acceleration_limit() -> f64 {
    1.5
}

fn default_multiplier() -> f64 {
    6.0
}

fn default_friction() -> f64 {
    0.007
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.scroll.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/smoothwheel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("smoothwheel")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.display.refresh_rate_hz, None);
        assert_eq!(config.display.fallback_refresh_rate_hz, 60);
        assert!(config.scroll.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_uses_defaults() {
        let config = AppConfig::parse(
            r#"
            [scroll]
            friction = 0.02

            [display]
            refresh_rate_hz = 144
            "#,
        )
        .unwrap();

        assert!((config.scroll.friction - 0.02).abs() < 1e-12);
        assert!((config.scroll.threshold - 0.1).abs() < 1e-12);
        assert_eq!(config.display.refresh_rate_hz, Some(144));
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = AppConfig::parse("[scroll]\nspeed_limit = -3.0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTunable {
                key: Tunable::SpeedLimit,
                ..
            }
        ));

        let err = AppConfig::parse("[scroll]\nthreshold = \"fast\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Tunable::Threshold.validate(0.0).is_ok());
        assert!(Tunable::Threshold.validate(-0.1).is_err());
        assert!(Tunable::Friction.validate(f64::NAN).is_err());
        assert!(Tunable::AccelerationLimit.validate(0.0).is_err());
        assert!(Tunable::Multiplier.validate(0.0).is_err());
        assert!(Tunable::Multiplier.validate(-2.0).is_ok());
        assert!(Tunable::SpeedLimit.validate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_map_source_reports_missing_key() {
        let mut map = HashMap::new();
        map.insert(Tunable::Threshold, 0.5);

        assert!((TunableSource::get(&map, Tunable::Threshold).unwrap() - 0.5).abs() < 1e-12);
        assert!(matches!(
            TunableSource::get(&map, Tunable::Friction),
            Err(Error::MissingTunable(Tunable::Friction))
        ));
        assert!(DecayTunables::read(&map).is_err());
    }

    #[test]
    fn test_watch_source_sees_live_updates() {
        let (tx, rx) = watch::channel(ScrollTunables::default());
        assert!((rx.get(Tunable::Friction).unwrap() - 0.007).abs() < 1e-12);

        tx.send_modify(|t| t.friction = 0.5);
        let decay = DecayTunables::read(&rx).unwrap();
        assert!((decay.friction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_tunables_read() {
        let tunables = ScrollTunables {
            multiplier: 2.0,
            ..Default::default()
        };
        let wheel = WheelTunables::read(&tunables).unwrap();
        assert!((wheel.multiplier - 2.0).abs() < 1e-12);
        assert!((wheel.speed_limit - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("smoothwheel-config-{}", std::process::id()))
            .join("config.toml");

        let mut config = AppConfig::default();
        config.scroll.multiplier = 9.0;
        config.display.refresh_rate_hz = Some(120);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.scroll, config.scroll);
        assert_eq!(loaded.display.refresh_rate_hz, Some(120));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_tunable_names() {
        let names: Vec<_> = Tunable::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            [
                "threshold",
                "speed_limit",
                "acceleration_limit",
                "multiplier",
                "friction"
            ]
        );
    }
}
