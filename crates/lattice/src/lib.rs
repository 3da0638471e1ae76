#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Lattice Simulator Contract
//!
//! The ice-model Monte Carlo engine is an external collaborator. This crate
//! pins down what the episode controller needs from it and nothing more:
//!
//! -   **[`Simulator`]:** the stateful engine interface. Loop-building moves,
//!     the global Metropolis test, commit/discard of the move buffer, counters
//!     and the four scalar maps all go through this trait.
//! -   **[`Direction`]:** the six loop-building moves an agent can draw.
//! -   **[`ActionReturn`]:** the four floating-point signals the engine hands
//!     back for every move or proposal.
//! -   **[`Lattice`]:** geometry of the periodic `L x L` site grid.
//!
//! With the `mock` feature enabled, [`mock::ScriptedSim`] provides a
//! deterministic in-memory engine for exercising controllers without any
//! physics.

use thiserror::Error;

pub mod geometry;

#[cfg(feature = "mock")]
pub mod mock;

pub use geometry::Lattice;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("site {site} is outside a lattice of {sites} sites")]
    SiteOutOfRange { site: usize, sites: usize },
    #[error("{name} map holds {actual} cells, expected {expected}")]
    MapShape {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Loop-building move. Discriminants match the engine's `draw` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
    LowerNext = 4,
    UpperNext = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
        Direction::LowerNext,
        Direction::UpperNext,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Signals returned by [`Simulator::draw`] and [`Simulator::metropolis`].
///
/// For a loop-building move the slots are move-local deltas. For a
/// Metropolis proposal the same slots carry
/// `(acceptance, secondary_accept, unused, nonzero_if_meaningful)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionReturn {
    pub icemove: f64,
    pub energy_delta: f64,
    pub defect_delta: f64,
    pub legality: f64,
}

impl ActionReturn {
    #[must_use]
    pub const fn new(icemove: f64, energy_delta: f64, defect_delta: f64, legality: f64) -> Self {
        Self { icemove, energy_delta, defect_delta, legality }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.icemove, self.energy_delta, self.defect_delta, self.legality]
    }
}

impl From<[f64; 4]> for ActionReturn {
    fn from(rets: [f64; 4]) -> Self {
        Self::new(rets[0], rets[1], rets[2], rets[3])
    }
}

/// Stateful ice-model engine driven by an episode controller.
///
/// Mutating calls are limited to the documented primitives (`draw`,
/// `flip_trajectory`, `metropolis`, `update_config`, `clear_buffer` and the
/// start/restart pair). Everything else is a side-effect-free observer.
///
/// Scalar maps are returned row-major with `L * L` cells.
pub trait Simulator {
    /// Sets the Metropolis temperature. Must precede any move.
    fn set_temperature(&mut self, kt: f64);

    /// Builds the initial lattice configuration.
    fn init_model(&mut self);

    /// Runs `steps` warmup Monte Carlo sweeps.
    fn mc_run(&mut self, steps: usize);

    /// Places the agent at `site` for the first episode and returns the
    /// committed site.
    fn start(&mut self, site: usize) -> usize;

    /// Clears the move buffer, places the agent at `site` and returns the
    /// committed site.
    fn restart(&mut self, site: usize) -> usize;

    /// Attempts one loop-building move.
    fn draw(&mut self, direction: Direction) -> ActionReturn;

    /// Marks the built trajectory as the candidate loop.
    fn flip_trajectory(&mut self);

    /// Runs the global accept/reject test on the candidate loop.
    fn metropolis(&mut self) -> ActionReturn;

    /// Persists the accepted configuration.
    fn update_config(&mut self);

    /// Discards the in-progress trajectory.
    fn clear_buffer(&mut self);

    fn total_steps(&self) -> u64;

    fn ep_step_counter(&self) -> u64;

    /// Lengths of every loop accepted so far, oldest first.
    fn accepted_lengths(&self) -> Vec<usize>;

    /// Sites visited since the last buffer clear.
    fn trajectory(&self) -> Vec<usize>;

    /// Number of committed configuration updates.
    fn updated_counter(&self) -> u64;

    fn ep_action_counters(&self) -> Vec<u64>;

    /// Per-action totals across all episodes.
    fn action_statistics(&self) -> Vec<f64>;

    fn agent_site(&self) -> usize;

    /// Site the current trajectory started from.
    fn start_site(&self) -> usize;

    fn state_map(&self) -> Vec<f64>;

    fn canvas_map(&self) -> Vec<f64>;

    fn energy_map(&self) -> Vec<f64>;

    fn defect_map(&self) -> Vec<f64>;

    /// Action index of a move the engine considers ice-rule preserving.
    fn icemove_index(&self) -> usize;

    fn timeout(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_indices_follow_draw_codes() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(Direction::from_index(i), Some(*dir));
        }
        assert_eq!(Direction::from_index(6), None);
    }

    #[test]
    fn action_return_keeps_slot_order() {
        let rets = ActionReturn::from([0.1, -0.02, 0.0, 1.0]);
        assert_eq!(rets.icemove, 0.1);
        assert_eq!(rets.energy_delta, -0.02);
        assert_eq!(rets.to_array(), [0.1, -0.02, 0.0, 1.0]);
    }
}
