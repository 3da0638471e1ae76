//! Deterministic in-memory engine for controller tests.
//!
//! [`ScriptedSim`] has no Hamiltonian. Move and proposal outcomes are popped
//! from queues filled by the test, with simple defaults when a queue is
//! empty. It keeps the bookkeeping a real engine keeps (trajectory, canvas,
//! counters) and records every mutating call so tests can assert ordering.

use std::collections::VecDeque;

use crate::{ActionReturn, Direction, Lattice, Simulator};

/// Number of counted actions: six moves plus the Metropolis proposal.
const COUNTED_ACTIONS: usize = 7;
const METROPOLIS_SLOT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCall {
    SetTemperature(f64),
    InitModel,
    McRun(usize),
    Start(usize),
    Restart(usize),
    Draw(Direction),
    FlipTrajectory,
    Metropolis,
    UpdateConfig,
    ClearBuffer,
}

pub struct ScriptedSim {
    lattice: Lattice,
    draws: VecDeque<ActionReturn>,
    proposals: VecDeque<ActionReturn>,
    site_drift: usize,
    timeout_after: Option<u64>,
    missing_lengths: bool,
    icemove: Direction,
    calls: Vec<SimCall>,
    temperature: f64,
    agent: usize,
    start: usize,
    flipped: bool,
    trajectory: Vec<usize>,
    accepted_lengths: Vec<usize>,
    updated: u64,
    total_steps: u64,
    ep_steps: u64,
    ep_counters: [u64; COUNTED_ACTIONS],
    counters: [u64; COUNTED_ACTIONS],
    state: Vec<f64>,
    canvas: Vec<f64>,
    energy: Vec<f64>,
    defect: Vec<f64>,
}

impl ScriptedSim {
    #[must_use]
    pub fn new(size: usize) -> Self {
        let lattice = Lattice::new(size);
        let sites = lattice.sites();
        Self {
            lattice,
            draws: VecDeque::new(),
            proposals: VecDeque::new(),
            site_drift: 0,
            timeout_after: None,
            missing_lengths: false,
            icemove: Direction::Right,
            calls: Vec::new(),
            temperature: 0.0,
            agent: 0,
            start: 0,
            flipped: false,
            trajectory: Vec::new(),
            accepted_lengths: Vec::new(),
            updated: 0,
            total_steps: 0,
            ep_steps: 0,
            ep_counters: [0; COUNTED_ACTIONS],
            counters: [0; COUNTED_ACTIONS],
            state: vec![0.0; sites],
            canvas: vec![0.0; sites],
            energy: vec![0.0; sites],
            defect: vec![0.0; sites],
        }
    }

    /// Queues the return of the next `draw` calls, in order.
    #[must_use]
    pub fn with_draws<I: IntoIterator<Item = ActionReturn>>(mut self, draws: I) -> Self {
        self.draws.extend(draws);
        self
    }

    /// Queues the return of the next `metropolis` calls, in order.
    #[must_use]
    pub fn with_proposals<I: IntoIterator<Item = ActionReturn>>(mut self, proposals: I) -> Self {
        self.proposals.extend(proposals);
        self
    }

    /// Makes `start`/`restart` commit `site + drift` instead of `site`.
    #[must_use]
    pub fn with_site_drift(mut self, drift: usize) -> Self {
        self.site_drift = drift;
        self
    }

    /// Reports a timeout once an episode has taken `steps` steps.
    #[must_use]
    pub fn with_timeout_after(mut self, steps: u64) -> Self {
        self.timeout_after = Some(steps);
        self
    }

    /// Makes `update_config` commit without recording the loop length.
    #[must_use]
    pub fn with_missing_lengths(mut self) -> Self {
        self.missing_lengths = true;
        self
    }

    #[must_use]
    pub fn with_icemove(mut self, direction: Direction) -> Self {
        self.icemove = direction;
        self
    }

    #[must_use]
    pub fn with_energy_map(mut self, map: Vec<f64>) -> Self {
        self.energy = map;
        self
    }

    #[must_use]
    pub fn with_defect_map(mut self, map: Vec<f64>) -> Self {
        self.defect = map;
        self
    }

    /// Mutating calls received so far.
    #[must_use]
    pub fn calls(&self) -> &[SimCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn place(&mut self, site: usize) -> usize {
        let committed = (site + self.site_drift) % self.lattice.sites();
        self.agent = committed;
        self.start = committed;
        committed
    }

    fn count(&mut self, slot: usize) {
        self.total_steps += 1;
        self.ep_steps += 1;
        self.counters[slot] += 1;
        self.ep_counters[slot] += 1;
    }

    fn reset_buffer(&mut self) {
        self.trajectory.clear();
        self.canvas.iter_mut().for_each(|c| *c = 0.0);
        self.flipped = false;
        self.agent = self.start;
    }
}

impl Simulator for ScriptedSim {
    fn set_temperature(&mut self, kt: f64) {
        self.calls.push(SimCall::SetTemperature(kt));
        self.temperature = kt;
    }

    fn init_model(&mut self) {
        self.calls.push(SimCall::InitModel);
        let l = self.lattice.size();
        for (site, spin) in self.state.iter_mut().enumerate() {
            let (row, col) = (site / l, site % l);
            *spin = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
        }
    }

    fn mc_run(&mut self, steps: usize) {
        self.calls.push(SimCall::McRun(steps));
    }

    fn start(&mut self, site: usize) -> usize {
        self.calls.push(SimCall::Start(site));
        self.place(site)
    }

    fn restart(&mut self, site: usize) -> usize {
        self.calls.push(SimCall::Restart(site));
        let committed = self.place(site);
        self.reset_buffer();
        self.ep_steps = 0;
        self.ep_counters = [0; COUNTED_ACTIONS];
        committed
    }

    fn draw(&mut self, direction: Direction) -> ActionReturn {
        self.calls.push(SimCall::Draw(direction));
        self.count(direction.index());
        let rets = self
            .draws
            .pop_front()
            .unwrap_or(ActionReturn::new(1.0, 0.0, 0.0, 1.0));
        if rets.legality > 0.0 {
            if self.trajectory.is_empty() {
                self.trajectory.push(self.agent);
            }
            self.agent = self.lattice.neighbor(self.agent, direction);
            // Returning to the first site closes the loop.
            if self.trajectory.first() != Some(&self.agent) {
                self.trajectory.push(self.agent);
            }
            self.canvas[self.agent] = 1.0;
        }
        tracing::trace!(?direction, agent = self.agent, "scripted draw");
        rets
    }

    fn flip_trajectory(&mut self) {
        self.calls.push(SimCall::FlipTrajectory);
        self.flipped = true;
    }

    fn metropolis(&mut self) -> ActionReturn {
        self.calls.push(SimCall::Metropolis);
        self.count(METROPOLIS_SLOT);
        self.proposals.pop_front().unwrap_or_else(|| {
            if self.flipped && !self.trajectory.is_empty() {
                ActionReturn::new(1.0, 1.0, 0.0, 1.0)
            } else {
                ActionReturn::default()
            }
        })
    }

    fn update_config(&mut self) {
        self.calls.push(SimCall::UpdateConfig);
        for &site in &self.trajectory {
            self.state[site] = -self.state[site];
        }
        if !self.missing_lengths {
            self.accepted_lengths.push(self.trajectory.len());
        }
        self.updated += 1;
    }

    fn clear_buffer(&mut self) {
        self.calls.push(SimCall::ClearBuffer);
        self.reset_buffer();
    }

    fn total_steps(&self) -> u64 {
        self.total_steps
    }

    fn ep_step_counter(&self) -> u64 {
        self.ep_steps
    }

    fn accepted_lengths(&self) -> Vec<usize> {
        self.accepted_lengths.clone()
    }

    fn trajectory(&self) -> Vec<usize> {
        self.trajectory.clone()
    }

    fn updated_counter(&self) -> u64 {
        self.updated
    }

    fn ep_action_counters(&self) -> Vec<u64> {
        self.ep_counters.to_vec()
    }

    #[allow(clippy::cast_precision_loss)]
    fn action_statistics(&self) -> Vec<f64> {
        self.counters.iter().map(|&c| c as f64).collect()
    }

    fn agent_site(&self) -> usize {
        self.agent
    }

    fn start_site(&self) -> usize {
        self.start
    }

    fn state_map(&self) -> Vec<f64> {
        self.state.clone()
    }

    fn canvas_map(&self) -> Vec<f64> {
        self.canvas.clone()
    }

    fn energy_map(&self) -> Vec<f64> {
        self.energy.clone()
    }

    fn defect_map(&self) -> Vec<f64> {
        self.defect.clone()
    }

    fn icemove_index(&self) -> usize {
        self.icemove.index()
    }

    fn timeout(&self) -> bool {
        self.timeout_after.is_some_and(|limit| self.ep_steps >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_draws_extend_trajectory() {
        let mut sim = ScriptedSim::new(4);
        sim.start(5);
        sim.draw(Direction::Right);
        sim.draw(Direction::Down);
        assert_eq!(sim.trajectory(), vec![5, 6, 10]);
        assert_eq!(sim.agent_site(), 10);
        assert_eq!(sim.canvas_map()[6], 1.0);
        assert_eq!(sim.total_steps(), 2);
    }

    #[test]
    fn illegal_draw_leaves_agent_in_place() {
        let mut sim = ScriptedSim::new(4).with_draws([ActionReturn::new(0.0, 0.0, 0.0, 0.0)]);
        sim.start(0);
        sim.draw(Direction::Up);
        assert!(sim.trajectory().is_empty());
        assert_eq!(sim.agent_site(), 0);
    }

    #[test]
    fn default_proposal_needs_a_flipped_trajectory() {
        let mut sim = ScriptedSim::new(4);
        sim.start(0);
        assert_eq!(sim.metropolis(), ActionReturn::default());
        sim.draw(Direction::Right);
        sim.flip_trajectory();
        assert_eq!(sim.metropolis().icemove, 1.0);
    }

    #[test]
    fn restart_applies_drift_and_clears_episode_counters() {
        let mut sim = ScriptedSim::new(4).with_site_drift(1);
        sim.start(0);
        sim.draw(Direction::Right);
        assert_eq!(sim.restart(15), 0);
        assert_eq!(sim.ep_step_counter(), 0);
        assert!(sim.trajectory().is_empty());
        assert_eq!(sim.total_steps(), 1);
    }

    #[test]
    fn update_config_records_loop_length() {
        let mut sim = ScriptedSim::new(4);
        sim.init_model();
        sim.start(0);
        for dir in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            sim.draw(dir);
        }
        sim.update_config();
        assert_eq!(sim.trajectory(), vec![0, 1, 5, 4]);
        assert_eq!(sim.accepted_lengths(), vec![4]);
        assert_eq!(sim.updated_counter(), 1);
        assert_eq!(sim.state_map()[0], -1.0);
        assert_eq!(sim.state_map()[1], 1.0);
    }

    #[test]
    fn missing_lengths_still_commit() {
        let mut sim = ScriptedSim::new(4).with_missing_lengths();
        sim.init_model();
        sim.start(0);
        sim.draw(Direction::Right);
        sim.update_config();
        assert!(sim.accepted_lengths().is_empty());
        assert_eq!(sim.updated_counter(), 1);
        assert_eq!(sim.state_map()[0], -1.0);
    }
}
