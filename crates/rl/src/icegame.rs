//! Episode controller for the loop algorithm.
//!
//! The agent builds a candidate loop with moves `0..=5`, then submits it
//! with action `6`. An accepted loop is committed, logged and rendered, and
//! the episode carries on. A rejected loop ends the episode.

use lattice::{ActionReturn, Lattice, Simulator};
use render::{render_canvas, LoopLog, RenderLog};

use crate::action::{dispatch, Action, ActionSpace};
use crate::env::{Env, Transition};
use crate::observation::{build_observation, Observation, ObservationSpace};
use crate::reward::proposal_accepted;
use crate::{EnvConfig, EnvError};

/// Where the current episode stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Loop under construction.
    Building,
    /// Proposal dispatched, outcome not yet judged.
    ProposalPending,
    /// Last proposal committed; the episode continues.
    Accepted,
    /// Last proposal rejected; the caller should reset.
    Terminated,
}

/// Gym-style environment over an ice-model [`Simulator`].
pub struct IceGameEnv<S: Simulator> {
    sim: S,
    config: EnvConfig,
    lattice: Lattice,
    rng: fastrand::Rng,
    loop_log: LoopLog,
    render_log: RenderLog,
    episode: u64,
    phase: EpisodePhase,
    accepted: bool,
}

impl<S: Simulator> IceGameEnv<S> {
    /// Configures and thermalizes `sim`, ready for [`IceGameEnv::start`] or
    /// [`Env::reset`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: EnvConfig, mut sim: S) -> Result<Self, EnvError> {
        config.validate()?;
        sim.set_temperature(config.temperature);
        sim.init_model();
        sim.mc_run(config.mc_steps);
        tracing::info!(
            size = config.size,
            temperature = config.temperature,
            mc_steps = config.mc_steps,
            "simulator thermalized"
        );

        let rng = config.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Ok(Self {
            lattice: Lattice::new(config.size),
            loop_log: LoopLog::new(&config.loop_log),
            render_log: RenderLog::new(&config.render_log),
            sim,
            config,
            rng,
            episode: 0,
            phase: EpisodePhase::Building,
            accepted: false,
        })
    }

    /// Places the agent for the very first episode.
    ///
    /// # Errors
    ///
    /// [`EnvError::Lattice`] for an off-lattice site and
    /// [`EnvError::SiteMismatch`] if the simulator commits a different one.
    pub fn start(&mut self, init_site: usize) -> Result<(), EnvError> {
        self.lattice.check_site(init_site)?;
        let reported = self.sim.start(init_site);
        ensure_same_site(init_site, reported)?;
        self.phase = EpisodePhase::Building;
        Ok(())
    }

    /// Current observation.
    ///
    /// # Errors
    ///
    /// Fails if a simulator map does not match the lattice size.
    pub fn observation(&self) -> Result<Observation, EnvError> {
        Ok(build_observation(&self.sim, self.lattice)?)
    }

    /// Text snapshot of the canvas with the trajectory start marked.
    ///
    /// # Errors
    ///
    /// Fails if the canvas or start site do not fit the lattice.
    pub fn snapshot(&self) -> Result<String, EnvError> {
        Ok(render_canvas(&self.sim.canvas_map(), self.lattice, self.sim.start_site())?)
    }

    /// Appends a snapshot to the render log.
    ///
    /// # Errors
    ///
    /// Fails on a malformed canvas or if the log cannot be written.
    pub fn render(&self) -> Result<(), EnvError> {
        let screen = self.snapshot()?;
        self.render_log.append(self.episode, self.sim.total_steps(), &screen)?;
        Ok(())
    }

    /// Number of resets so far.
    #[must_use]
    pub fn episode_index(&self) -> u64 {
        self.episode
    }

    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Whether the current episode has had a loop accepted.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    #[must_use]
    pub fn timeout(&self) -> bool {
        self.sim.timeout()
    }

    #[must_use]
    pub fn agent_site(&self) -> usize {
        self.sim.agent_site()
    }

    /// Move the simulator suggests as ice-rule preserving, if it names one.
    #[must_use]
    pub fn sample_icemove_action(&self) -> Option<Action> {
        i64::try_from(self.sim.icemove_index())
            .ok()
            .and_then(|id| Action::from_id(id).ok())
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    #[must_use]
    pub fn simulator(&self) -> &S {
        &self.sim
    }

    pub fn simulator_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Commits the accepted loop. The move buffer is cleared even when
    /// recording the loop fails.
    fn commit_loop(&mut self) -> Result<f64, EnvError> {
        self.sim.update_config();
        let recorded = self.record_accepted_loop();
        self.sim.clear_buffer();
        self.accepted = true;
        self.phase = EpisodePhase::Accepted;
        if let Err(e) = &recorded {
            tracing::error!(error = %e, fatal = e.is_fatal(), "accepted loop not recorded");
        }
        recorded
    }

    /// Reward, loop-log line, acceptance event and render for a committed loop.
    fn record_accepted_loop(&self) -> Result<f64, EnvError> {
        let loop_length = self
            .sim
            .accepted_lengths()
            .last()
            .copied()
            .ok_or(EnvError::MissingLoopLength)?;
        let reward = self.config.reward.accepted(loop_length);

        self.loop_log.append(&self.sim.trajectory())?;

        let total_steps = self.sim.total_steps();
        let counters = self.sim.ep_action_counters();
        match action_frequencies(&self.sim.action_statistics(), total_steps) {
            Some(frequencies) => tracing::info!(
                accepted_total = self.sim.updated_counter(),
                loop_length,
                episode_steps = self.sim.ep_step_counter(),
                action_counters = ?counters,
                total_steps,
                action_frequencies = ?frequencies,
                "proposal accepted"
            ),
            None => {
                tracing::info!(
                    accepted_total = self.sim.updated_counter(),
                    loop_length,
                    episode_steps = self.sim.ep_step_counter(),
                    action_counters = ?counters,
                    "proposal accepted"
                );
                tracing::warn!("action frequencies skipped, simulator reports zero total steps");
            }
        }

        self.render()?;
        Ok(reward)
    }

    #[allow(clippy::float_cmp)]
    fn reject_loop(&mut self, rets: &ActionReturn) -> f64 {
        self.sim.clear_buffer();
        self.phase = EpisodePhase::Terminated;
        let reward = self.config.reward.rejected(rets);
        tracing::debug!(illegal = rets.legality == 0.0, reward, "proposal rejected");
        reward
    }
}

impl<S: Simulator> Env for IceGameEnv<S> {
    fn step(&mut self, action: i64) -> Result<Transition, EnvError> {
        let action = Action::from_id(action)?;
        if action == Action::Metropolis {
            self.phase = EpisodePhase::ProposalPending;
        }

        let dispatched = dispatch(&mut self.sim, action);
        let returns = dispatched.returns;
        let mut terminate = false;
        let reward = if dispatched.metropolis_executed {
            if proposal_accepted(&returns) {
                self.commit_loop()?
            } else {
                terminate = true;
                self.reject_loop(&returns)
            }
        } else {
            self.phase = EpisodePhase::Building;
            self.config.reward.stepwise(&returns)
        };

        tracing::debug!(action = action.name(), reward, terminate, "step");
        Ok(Transition { observation: self.observation()?, reward, terminate, returns })
    }

    fn reset(&mut self) -> Result<Observation, EnvError> {
        let site = self.rng.usize(..self.lattice.sites());
        let reported = self.sim.restart(site);
        ensure_same_site(site, reported)?;
        self.episode += 1;
        self.phase = EpisodePhase::Building;
        self.accepted = false;
        tracing::debug!(episode = self.episode, site, "episode reset");
        self.observation()
    }

    fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::for_lattice(self.lattice)
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::default()
    }
}

fn ensure_same_site(requested: usize, reported: usize) -> Result<(), EnvError> {
    if requested == reported {
        Ok(())
    } else {
        tracing::error!(requested, reported, "simulator desynchronized from controller");
        Err(EnvError::SiteMismatch { requested, reported })
    }
}

/// Per-action share of all steps, `None` while no step has been counted.
#[allow(clippy::cast_precision_loss)]
fn action_frequencies(counters: &[f64], total_steps: u64) -> Option<Vec<f64>> {
    if total_steps == 0 {
        return None;
    }
    let total = total_steps as f64;
    Some(counters.iter().map(|count| count / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_divide_by_total_steps() {
        assert_eq!(action_frequencies(&[2.0, 6.0], 8), Some(vec![0.25, 0.75]));
    }

    #[test]
    fn frequencies_skip_zero_total() {
        assert_eq!(action_frequencies(&[0.0; 7], 0), None);
    }

    #[test]
    fn site_mismatch_is_fatal() {
        let err = ensure_same_site(3, 4).unwrap_err();
        assert!(err.is_fatal());
        assert!(ensure_same_site(5, 5).is_ok());
    }
}
