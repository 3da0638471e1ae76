#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use lattice::mock::ScriptedSim;
use rl::{EnvConfig, IceGameEnv};

pub const SIZE: usize = 4;
pub const START: usize = 5;

/// Config with fresh log files under the temp dir.
pub fn scratch_config(tag: &str) -> EnvConfig {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    let stem = format!("rl-{}-{tag}-{n}", std::process::id());
    let dir = std::env::temp_dir();
    let config = EnvConfig {
        size: SIZE,
        mc_steps: 10,
        loop_log: dir.join(format!("{stem}-loops.log")),
        render_log: dir.join(format!("{stem}-renders.log")),
        seed: Some(42),
        ..EnvConfig::default()
    };
    remove(&config.loop_log);
    remove(&config.render_log);
    config
}

pub fn remove(path: &Path) {
    let _ = std::fs::remove_file(path);
}

/// Environment placed at [`START`] with an empty call log.
pub fn started_env(tag: &str, sim: ScriptedSim) -> IceGameEnv<ScriptedSim> {
    let mut env = IceGameEnv::new(scratch_config(tag), sim).unwrap();
    env.start(START).unwrap();
    env.simulator_mut().clear_calls();
    env
}

pub fn cleanup(env: &IceGameEnv<ScriptedSim>) {
    remove(&env.config().loop_log);
    remove(&env.config().render_log);
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}
