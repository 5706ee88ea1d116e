use thiserror::Error;

use crate::config::Tunable;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing tunable: {0}")]
    MissingTunable(Tunable),

    #[error("Invalid tunable {key} = {value}: {reason}")]
    InvalidTunable {
        key: Tunable,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid frame rate: {0} Hz")]
    InvalidFrameRate(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
