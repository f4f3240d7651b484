use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the outer surfaces of the simulation (files, config, reports).
///
/// Nothing inside a tick returns one of these: the per-frame step always
/// produces a defined next state.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    /// A tunable is outside the range the simulation stays stable in.
    #[error("constant '{name}' = {value} is outside safe range {safe_range}")]
    UnsafeConstant {
        name: &'static str,
        value: f64,
        safe_range: &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SimError::Io { path: path.into(), source }
    }
}
