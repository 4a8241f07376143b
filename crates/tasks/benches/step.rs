use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tasks::medicine_sort::{compute_reward, MedicineSortEnv};
use tasks::{Env, EnvConfig, ResetOptions, RewardMode};

fn make_env(num_envs: usize) -> MedicineSortEnv {
    let config = EnvConfig {
        num_envs,
        seed: Some(0),
        max_episode_steps: Some(u32::MAX),
        ..EnvConfig::default()
    };
    let mut env = MedicineSortEnv::new(config).unwrap();
    env.reset(ResetOptions::default()).unwrap();
    env
}

fn bench_evaluate(c: &mut Criterion) {
    let env = make_env(256);
    c.bench_function("evaluate_and_reward_256", |b| {
        b.iter(|| {
            let eval = env.evaluate().unwrap();
            black_box(compute_reward(RewardMode::NormalizedDense, &eval, env.task()))
        });
    });
}

fn bench_step(c: &mut Criterion) {
    let mut env = make_env(64);
    let action = env.sample_action();
    c.bench_function("env_step_64", |b| {
        b.iter(|| black_box(env.step(&action).unwrap()));
    });
}

fn bench_reset(c: &mut Criterion) {
    let mut env = make_env(64);
    c.bench_function("env_reset_64", |b| {
        b.iter(|| black_box(env.reset(ResetOptions::default()).unwrap()));
    });
}

criterion_group!(benches, bench_evaluate, bench_step, bench_reset);
criterion_main!(benches);
