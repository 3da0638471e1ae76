mod common;

use lattice::mock::ScriptedSim;
use lattice::LatticeError;
use rl::{Channel, Env, EnvError, IceGameEnv};

use common::{cleanup, scratch_config, started_env, SIZE, START};

fn ramp(scale: f64) -> Vec<f64> {
    (0..SIZE * SIZE).map(|i| i as f64 * scale).collect()
}

#[test]
fn channels_stack_in_fixed_order() {
    let sim = ScriptedSim::new(SIZE)
        .with_energy_map(ramp(0.5))
        .with_defect_map(ramp(-1.0));
    let mut env = started_env("channels", sim);
    env.step(0).unwrap();

    let obs = env.observation().unwrap();
    assert_eq!(obs.shape, [SIZE, SIZE, 4]);

    let config = obs.channel(Channel::Config);
    assert_eq!(config[0], 1.0);
    assert_eq!(config[1], -1.0);

    let canvas = obs.channel(Channel::Canvas);
    assert_eq!(canvas[START + 1], 1.0);
    assert_eq!(canvas.iter().filter(|&&c| c != 0.0).count(), 1);

    assert_eq!(obs.get(2, 3, Channel::Energy), Some(5.5));
    assert_eq!(obs.get(3, 3, Channel::Defect), Some(-15.0));
    assert_eq!(obs.get(SIZE, 0, Channel::Energy), None);
    cleanup(&env);
}

#[test]
fn step_observation_matches_direct_build() {
    let mut env = started_env("step-obs", ScriptedSim::new(SIZE));
    let step = env.step(1).unwrap();
    assert_eq!(step.observation, env.observation().unwrap());
    cleanup(&env);
}

#[test]
fn map_of_wrong_size_is_reported() {
    let sim = ScriptedSim::new(SIZE).with_defect_map(vec![0.0; 3]);
    let mut env = IceGameEnv::new(scratch_config("bad-map"), sim).unwrap();
    let err = env.reset().unwrap_err();
    assert!(matches!(
        err,
        EnvError::Lattice(LatticeError::MapShape { name: "defect", expected: 16, actual: 3 })
    ));
}

#[test]
fn declared_spaces() {
    let env = started_env("spaces", ScriptedSim::new(SIZE));
    let obs_space = env.observation_space();
    assert_eq!(obs_space.shape, [SIZE, SIZE, 4]);
    assert_eq!((obs_space.low, obs_space.high), (-1.0, 1.0));
    assert_eq!(env.action_space().n, 7);
    assert_eq!(rl::REWARD_RANGE, (-1.0, 1.0));
    cleanup(&env);
}
