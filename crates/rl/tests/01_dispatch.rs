mod common;

use lattice::mock::{ScriptedSim, SimCall};
use lattice::{ActionReturn, Direction, Simulator};
use rl::{dispatch, Action, Env, EnvError};

use common::{cleanup, started_env, SIZE};

#[test]
fn out_of_range_actions_never_reach_the_simulator() {
    let mut env = started_env("invalid", ScriptedSim::new(SIZE));
    for bad in [7, 8, -1, i64::MAX] {
        assert!(matches!(env.step(bad), Err(EnvError::InvalidAction(a)) if a == bad));
    }
    assert!(env.simulator().calls().is_empty());
    assert_eq!(env.simulator().total_steps(), 0);
    cleanup(&env);
}

#[test]
fn moves_become_single_draws() {
    let mut env = started_env("draws", ScriptedSim::new(SIZE));
    for id in 0..6 {
        env.step(id).unwrap();
    }
    let expected: Vec<_> = Direction::ALL.iter().map(|&d| SimCall::Draw(d)).collect();
    assert_eq!(env.simulator().calls(), expected.as_slice());
    cleanup(&env);
}

#[test]
fn proposal_flips_before_metropolis() {
    let mut sim = ScriptedSim::new(SIZE);
    sim.start(0);
    sim.clear_calls();

    let out = dispatch(&mut sim, Action::Metropolis);
    assert!(out.metropolis_executed);
    assert_eq!(out.returns, ActionReturn::default());
    assert_eq!(sim.calls(), &[SimCall::FlipTrajectory, SimCall::Metropolis]);
}

#[test]
fn move_dispatch_forwards_returns() {
    let rets = ActionReturn::new(1.0, -0.5, 0.0, 1.0);
    let mut sim = ScriptedSim::new(SIZE).with_draws([rets]);
    sim.start(0);

    let out = dispatch(&mut sim, Action::LowerNext);
    assert!(!out.metropolis_executed);
    assert_eq!(out.returns, rets);
    assert_eq!(sim.agent_site(), 5);
}

#[test]
fn icemove_suggestion_maps_to_action() {
    let env = started_env("icemove", ScriptedSim::new(SIZE).with_icemove(Direction::Up));
    assert_eq!(env.sample_icemove_action(), Some(Action::Up));
    cleanup(&env);
}
