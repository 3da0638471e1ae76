//! Reward shaping for loop construction and proposal outcomes.

use lattice::ActionReturn;
use serde::{Deserialize, Serialize};

/// Shaping constants. These are policy knobs, not physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub icemove_weight: f64,
    pub energy_weight: f64,
    pub defect_weight: f64,
    pub baseline: f64,
    pub scaling: f64,
    /// Length of the shortest closed loop; an accepted loop of this length
    /// earns exactly 1.0.
    pub loop_normalizer: f64,
    /// Paid when a proposal is made with a zero legality signal.
    pub illegal_proposal_penalty: f64,
    /// Paid when a legal proposal fails the Metropolis test.
    pub rejected_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            icemove_weight: 0.0,
            energy_weight: -1.0,
            defect_weight: 0.0,
            baseline: 1.0 / 1024.0,
            scaling: 2.0,
            loop_normalizer: 4.0,
            illegal_proposal_penalty: -0.8,
            rejected_reward: 0.0,
        }
    }
}

impl RewardConfig {
    /// Reward for a loop-building move.
    #[must_use]
    pub fn stepwise(&self, rets: &ActionReturn) -> f64 {
        (self.icemove_weight * rets.icemove
            + self.energy_weight * rets.energy_delta
            + self.defect_weight * rets.defect_delta
            + self.baseline)
            * self.scaling
    }

    /// Reward for an accepted loop of `loop_length` sites.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accepted(&self, loop_length: usize) -> f64 {
        loop_length as f64 / self.loop_normalizer
    }

    /// Reward for a rejected proposal.
    ///
    /// A zero legality slot is read as "proposed before any valid move".
    /// The exact-zero test is kept literal; it is a proxy for an empty
    /// trajectory rather than a documented engine signal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn rejected(&self, rets: &ActionReturn) -> f64 {
        if rets.legality == 0.0 {
            self.illegal_proposal_penalty
        } else {
            self.rejected_reward
        }
    }
}

/// True when a Metropolis return signals acceptance.
#[must_use]
pub fn proposal_accepted(rets: &ActionReturn) -> bool {
    rets.icemove > 0.0 && rets.legality > 0.0
}
