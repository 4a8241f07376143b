use physics::{CameraSpec, Pose, Vec3};
use tasks::medicine_sort::{Category, MedicineSortEnv, TaskConfig};
use tasks::{Env, EnvConfig, EnvError, ObsMode, RewardMode, ResetOptions};

fn make_env(num_envs: usize, reward_mode: RewardMode) -> MedicineSortEnv {
    let config = EnvConfig {
        num_envs,
        reward_mode,
        seed: Some(42),
        ..EnvConfig::default()
    };
    MedicineSortEnv::new(config).unwrap()
}

/// Move the item of `category` to (x, y) in instance `env`.
fn place(env: &mut MedicineSortEnv, instance: usize, category: Category, x: f32, y: f32) {
    let item = env
        .sorting()
        .items
        .iter()
        .find(|i| i.category == category)
        .copied()
        .unwrap();
    let pose = Pose::from_position(Vec3::new(x, y, 0.02));
    env.scene_mut().set_pose(item.actor, &[instance], &[pose]).unwrap();
}

fn place_all_in_bins(env: &mut MedicineSortEnv, instance: usize) {
    place(env, instance, Category::Pill, 0.3, -0.2);
    place(env, instance, Category::Bottle, 0.3, 0.0);
    place(env, instance, Category::Syringe, 0.3, 0.2);
}

#[test]
fn initial_poses_stay_in_spawn_square_for_any_seed() {
    let mut env = make_env(16, RewardMode::Dense);
    for seed in 0..20 {
        env.reset(ResetOptions::default().with_seed(seed)).unwrap();
        for item in &env.sorting().items {
            for pose in env.scene().pose(item.actor).unwrap() {
                assert!((-0.2..=0.2).contains(&pose.p.x), "x = {}", pose.p.x);
                assert!((-0.2..=0.2).contains(&pose.p.y), "y = {}", pose.p.y);
                assert!((pose.p.z - 0.02).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn draws_are_independent_across_items_and_instances() {
    let mut env = make_env(4, RewardMode::Dense);
    env.reset(ResetOptions::default().with_seed(5)).unwrap();
    let mut xs = Vec::new();
    for item in &env.sorting().items {
        xs.extend(env.scene().pose(item.actor).unwrap().iter().map(|p| p.p.x));
    }
    for (i, a) in xs.iter().enumerate() {
        for b in &xs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn same_seed_reproduces_initial_poses() {
    let snapshot = |seed| {
        let mut env = make_env(3, RewardMode::Dense);
        env.reset(ResetOptions::default().with_seed(seed)).unwrap();
        env.sorting()
            .items
            .iter()
            .flat_map(|i| env.scene().pose(i.actor).unwrap().to_vec())
            .collect::<Vec<_>>()
    };
    assert_eq!(snapshot(9), snapshot(9));
    assert_ne!(snapshot(9), snapshot(10));
}

#[test]
fn items_in_matching_bins_succeed_with_full_reward() {
    let mut env = make_env(1, RewardMode::Dense);
    env.reset(ResetOptions::default()).unwrap();
    place_all_in_bins(&mut env, 0);

    let eval = env.evaluate().unwrap();
    assert_eq!(eval.success, vec![true]);
    assert_eq!(env.compute_dense_reward(&eval), vec![10.0]);
    assert_eq!(env.compute_normalized_dense_reward(&eval), vec![1.0]);
}

#[test]
fn items_at_origin_fail_with_partial_reward() {
    let mut env = make_env(1, RewardMode::Dense);
    env.reset(ResetOptions::default()).unwrap();
    for category in Category::ALL {
        place(&mut env, 0, category, 0.0, 0.0);
    }

    let eval = env.evaluate().unwrap();
    assert_eq!(eval.success, vec![false]);
    for (i, item) in eval.items.iter().enumerate() {
        let d = item.distances[0];
        assert!((0.2..0.37).contains(&d), "distance {d}");
        assert!(!eval.is_placed(i, 0, 0.05));
    }
    let reward = env.compute_dense_reward(&eval)[0];
    assert!(reward > 0.0 && reward < 10.0);
    let expected: f32 = eval.items.iter().map(|i| 1.0 - (5.0 * i.distances[0]).tanh()).sum();
    assert!((reward - expected).abs() < 1e-5);
}

#[test]
fn one_displaced_item_breaks_success() {
    let mut env = make_env(3, RewardMode::Dense);
    env.reset(ResetOptions::default()).unwrap();
    for instance in 0..3 {
        place_all_in_bins(&mut env, instance);
    }
    // bottle just outside its bin in instance 1, syringe far away in instance 2
    place(&mut env, 1, Category::Bottle, 0.36, 0.0);
    place(&mut env, 2, Category::Syringe, -0.1, 0.1);

    let eval = env.evaluate().unwrap();
    assert_eq!(eval.success, vec![true, false, false]);
    let reward = env.compute_dense_reward(&eval);
    assert_eq!(reward[0], 10.0);
    assert!(reward[1] < 10.0);
    assert!(reward[2] < 10.0);
}

#[test]
fn item_in_wrong_bin_is_not_placed() {
    let mut env = make_env(1, RewardMode::Dense);
    env.reset(ResetOptions::default()).unwrap();
    place_all_in_bins(&mut env, 0);
    // swap pill and syringe
    place(&mut env, 0, Category::Pill, 0.3, 0.2);
    place(&mut env, 0, Category::Syringe, 0.3, -0.2);
    assert_eq!(env.evaluate().unwrap().success, vec![false]);
}

#[test]
fn success_is_recomputed_every_step() {
    let mut env = make_env(1, RewardMode::NormalizedDense);
    env.reset(ResetOptions::default()).unwrap();
    place_all_in_bins(&mut env, 0);
    let zero = vec![0.0; env.action_size()];

    let out = env.step(&zero).unwrap();
    assert_eq!(out.info.success, vec![true]);
    assert_eq!(out.terminated, vec![true]);
    assert_eq!(out.reward, vec![1.0]);

    place(&mut env, 0, Category::Pill, 0.0, 0.0);
    let out = env.step(&zero).unwrap();
    assert_eq!(out.info.success, vec![false]);
    assert!(out.reward[0] < 1.0);
}

#[test]
fn partial_reset_leaves_other_instances_alone() {
    let mut env = make_env(3, RewardMode::Dense);
    env.reset(ResetOptions::default().with_seed(1)).unwrap();
    let pill = env.sorting().items[0].actor;
    let before = env.scene().pose(pill).unwrap().to_vec();

    env.step(&vec![0.0; env.action_size()]).unwrap();
    env.reset(ResetOptions::default().with_env_idx(vec![1])).unwrap();

    let after = env.scene().pose(pill).unwrap();
    assert_eq!(after[0], before[0]);
    assert_ne!(after[1], before[1]);
    assert_eq!(after[2], before[2]);
    assert_eq!(env.elapsed_steps(), &[1, 0, 1]);
}

#[test]
fn reset_rejects_out_of_range_instance() {
    let mut env = make_env(2, RewardMode::Dense);
    let err = env
        .reset(ResetOptions::default().with_env_idx(vec![0, 2]))
        .unwrap_err();
    assert!(matches!(err, EnvError::EnvIndexOutOfRange { index: 2, num_envs: 2 }));
}

#[test]
fn truncates_at_step_cap() {
    let config = EnvConfig {
        max_episode_steps: Some(3),
        seed: Some(0),
        ..EnvConfig::default()
    };
    let mut env = MedicineSortEnv::new(config).unwrap();
    env.reset(ResetOptions::default()).unwrap();
    let zero = vec![0.0; env.action_size()];
    assert_eq!(env.step(&zero).unwrap().truncated, vec![false]);
    assert_eq!(env.step(&zero).unwrap().truncated, vec![false]);
    let out = env.step(&zero).unwrap();
    assert_eq!(out.truncated, vec![true]);
    assert_eq!(out.info.elapsed_steps, vec![3]);
}

#[test]
fn step_checks_action_shape() {
    let mut env = make_env(2, RewardMode::Dense);
    env.reset(ResetOptions::default()).unwrap();
    let size = env.action_size();

    assert!(env.step(&vec![0.0; size]).is_ok());
    assert!(env.step(&vec![0.0; 2 * size]).is_ok());
    assert!(matches!(
        env.step(&vec![0.0; size + 1]),
        Err(EnvError::ActionShape { expected, got, .. }) if expected == 2 * size && got == size + 1
    ));
}

#[test]
fn state_observation_layout() {
    let mut env = make_env(2, RewardMode::Dense);
    let (obs, info) = env.reset(ResetOptions::default()).unwrap();
    assert_eq!(env.observation_size(), 45);
    assert_eq!(obs.dim, 45);
    assert_eq!(obs.num_rows(), 2);
    assert_eq!(info.success.len(), 2);

    // last six entries are the bin centers
    let row = obs.row(1);
    assert_eq!(&row[39..], &[0.3, -0.2, 0.3, 0.0, 0.3, 0.2]);
    // first item position follows the robot state
    let pill = env.scene().pose(env.sorting().items[0].actor).unwrap()[1];
    assert_eq!(&row[18..21], &pill.p.to_array());
}

#[test]
fn obs_mode_none_returns_empty_observation() {
    let config = EnvConfig {
        obs_mode: ObsMode::None,
        ..EnvConfig::default()
    };
    let mut env = MedicineSortEnv::new(config).unwrap();
    let (obs, _) = env.reset(ResetOptions::default()).unwrap();
    assert_eq!(env.observation_size(), 0);
    assert!(obs.data.is_empty());
}

#[test]
fn reconfigure_rebuilds_identical_scene() {
    let mut env = make_env(2, RewardMode::Dense);
    let names = |env: &MedicineSortEnv| {
        env.scene()
            .actors()
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<_>>()
    };
    let before = names(&env);
    env.reset(ResetOptions::reconfigure()).unwrap();
    assert_eq!(names(&env), before);
    assert_eq!(
        before,
        [
            "table-workspace",
            "ground",
            "pill_medicine",
            "bottle_medicine",
            "syringe_medicine",
            "pill_bin",
            "bottle_bin",
            "syringe_bin",
        ]
    );
}

#[test]
fn custom_threshold_is_honored() {
    let task = TaskConfig {
        success_threshold: 0.2,
        ..TaskConfig::default()
    };
    let config = EnvConfig {
        seed: Some(0),
        ..EnvConfig::default()
    };
    let mut env = MedicineSortEnv::with_task(config, task).unwrap();
    env.reset(ResetOptions::default()).unwrap();
    place_all_in_bins(&mut env, 0);
    place(&mut env, 0, Category::Bottle, 0.3, 0.1);
    assert_eq!(env.evaluate().unwrap().success, vec![true]);
}

#[test]
fn reconfigure_resets_every_instance() -> anyhow::Result<()> {
    let mut env = make_env(2, RewardMode::Dense);
    env.reset(ResetOptions::default())?;
    let zero = vec![0.0; env.action_size()];
    env.step(&zero)?;
    env.step(&zero)?;

    env.reset(ResetOptions::reconfigure().with_env_idx(vec![0]))?;

    assert_eq!(env.elapsed_steps(), &[0, 0]);
    for item in &env.sorting().items {
        for pose in env.scene().pose(item.actor)? {
            assert!((pose.p.z - 0.02).abs() < 1e-6, "item left at {}", pose.p);
        }
    }
    Ok(())
}

#[test]
fn reconfigure_keeps_added_cameras() -> anyhow::Result<()> {
    let mut env = make_env(1, RewardMode::Dense);
    env.add_camera(CameraSpec::new("overview", 320, 240));
    env.reset(ResetOptions::reconfigure())?;

    let names: Vec<_> = env.scene().cameras().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["render_camera", "overview"]);
    Ok(())
}
