use criterion::{criterion_group, criterion_main, Criterion};
use lattice::mock::ScriptedSim;
use rl::{Env, EnvConfig, IceGameEnv};

fn bench_loop_building(c: &mut Criterion) {
    let dir = std::env::temp_dir();
    let config = EnvConfig {
        size: 32,
        mc_steps: 0,
        loop_log: dir.join("bench-loop-sites.log"),
        render_log: dir.join("bench-loop-renders.log"),
        seed: Some(1),
        ..EnvConfig::default()
    };
    let mut env = IceGameEnv::new(config, ScriptedSim::new(32)).unwrap();
    env.start(0).unwrap();

    c.bench_function("loop_building_step", |b| {
        b.iter(|| env.step(0).unwrap());
    });

    c.bench_function("reset", |b| {
        b.iter(|| env.reset().unwrap());
    });
}

criterion_group!(benches, bench_loop_building);
criterion_main!(benches);
