use tj_core::{ConfigError, Tick};
use tj_physics::PhysicsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("match configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    /// The tick produced a world that breaks a core invariant.  The tick was
    /// not committed.
    #[error("invariant violated at {tick}: {detail}")]
    InvariantViolation { tick: Tick, detail: String },

    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),

    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
