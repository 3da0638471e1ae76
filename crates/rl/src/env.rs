use lattice::ActionReturn;

use crate::{ActionSpace, EnvError, Observation, ObservationSpace};

/// Declared reward range. Accepted loops longer than the normalizer exceed it.
pub const REWARD_RANGE: (f64, f64) = (-1.0, 1.0);

/// Result of one [`Env::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f64,
    /// Set only by a rejected proposal. Not sticky: the caller decides when
    /// to reset.
    pub terminate: bool,
    /// Raw simulator signals for the action.
    pub returns: ActionReturn,
}

/// Reinforcement learning environment trait.
///
/// Gym-style episodic interface: [`step`] advances by one discrete action,
/// [`reset`] starts a new episode. The environment never resets itself.
///
/// [`step`]: Env::step
/// [`reset`]: Env::reset
pub trait Env {
    /// Advance the environment by one action id.
    ///
    /// # Errors
    ///
    /// Ids outside the action space fail without touching the simulator.
    fn step(&mut self, action: i64) -> Result<Transition, EnvError>;

    /// Start a new episode and return its first observation.
    ///
    /// # Errors
    ///
    /// Fails if the simulator cannot be brought in sync with the new episode.
    fn reset(&mut self) -> Result<Observation, EnvError>;

    fn observation_space(&self) -> ObservationSpace;

    fn action_space(&self) -> ActionSpace;
}
