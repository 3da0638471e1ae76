#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Ice-Model Loop Environment
//!
//! Exposes a lattice ice-model Monte Carlo simulator as an episodic
//! reinforcement learning environment for the loop algorithm.
//!
//! An agent walks the lattice and proposes a closed loop of spin flips one
//! move at a time, then submits the loop to a global Metropolis test.
//!
//! ## Key Components
//!
//! -   **Actions:** [`Action`] enumerates the seven discrete actions and
//!     [`dispatch`] routes them to the simulator.
//! -   **Rewards:** [`RewardConfig`] holds the shaping constants for
//!     loop-building moves and for accepted or rejected proposals.
//! -   **Observations:** [`Observation`] stacks the configuration, canvas,
//!     energy and defect maps into an `(L, L, 4)` tensor.
//! -   **Controller:** [`IceGameEnv`] owns the episode state machine and
//!     implements [`Env`].
//!
//! The simulator itself is consumed through [`lattice::Simulator`].

pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod icegame;
pub mod observation;
pub mod reward;

pub use action::{dispatch, Action, ActionSpace, Dispatched, ACTION_NAMES};
pub use config::EnvConfig;
pub use env::{Env, Transition, REWARD_RANGE};
pub use error::EnvError;
pub use icegame::{EpisodePhase, IceGameEnv};
pub use observation::{build_observation, Channel, Observation, ObservationSpace};
pub use reward::{proposal_accepted, RewardConfig};
