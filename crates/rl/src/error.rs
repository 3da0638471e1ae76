use lattice::LatticeError;
use render::LogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("action {0} is outside the action space [0, 6]")]
    InvalidAction(i64),
    #[error("unknown action name {0:?}")]
    UnknownActionName(String),
    /// The simulator placed the agent somewhere other than requested. The
    /// controller and simulator no longer agree and the run must stop.
    #[error("simulator committed site {reported}, requested {requested}")]
    SiteMismatch { requested: usize, reported: usize },
    #[error("simulator accepted a loop but reported no accepted length")]
    MissingLoopLength,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Lattice(#[from] LatticeError),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),
    #[error("config read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl EnvError {
    /// Errors after which the controller must not be driven any further.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EnvError::SiteMismatch { .. } | EnvError::MissingLoopLength)
    }
}
