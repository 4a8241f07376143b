use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use medsort::app::{run, RunConfig};
use tasks::medicine_sort::TaskConfig;
use tasks::{EnvConfig, RenderMode};

fn temp_output(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("medsort-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&path);
    path
}

fn config(output_dir: Option<PathBuf>) -> RunConfig {
    RunConfig {
        env: EnvConfig {
            render_mode: RenderMode::Human,
            seed: Some(3),
            ..EnvConfig::default()
        },
        episodes: 2,
        max_steps_per_episode: 5,
        output_dir,
        log_every: 2,
        ..RunConfig::default()
    }
}

#[test]
fn bounded_run_writes_one_file_per_episode() -> anyhow::Result<()> {
    let dir = temp_output("bounded");
    let summary = run(&config(Some(dir.clone())), &AtomicBool::new(false))?;

    assert_eq!(summary.episodes_run, 2);
    assert_eq!(summary.total_steps, 10);
    assert!(!summary.interrupted);
    assert_eq!(summary.written, vec![dir.join("episode_000.json"), dir.join("episode_001.json")]);

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&summary.written[0])?)?;
    assert_eq!(json["camera"]["name"], "fixed_view");
    assert_eq!(json["camera"]["width"], 1280);
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0]["frames"], 2);
    assert_eq!(steps[0]["items"].as_array().unwrap().len(), 3);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn stop_flag_ends_run_before_any_step() -> anyhow::Result<()> {
    let summary = run(&config(None), &AtomicBool::new(true))?;
    assert!(summary.interrupted);
    assert_eq!(summary.episodes_run, 0);
    assert_eq!(summary.total_steps, 0);
    Ok(())
}

#[test]
fn success_ends_episode_early() -> anyhow::Result<()> {
    // a threshold wider than the table makes every snapshot a success
    let mut config = config(None);
    config.task = TaskConfig {
        success_threshold: 5.0,
        ..TaskConfig::default()
    };
    let summary = run(&config, &AtomicBool::new(false))?;
    assert_eq!(summary.episodes_run, 2);
    assert_eq!(summary.successes, 2);
    assert_eq!(summary.total_steps, 2);
    Ok(())
}

#[test]
fn episode_ends_at_environment_step_cap() -> anyhow::Result<()> {
    let mut config = config(None);
    config.env.max_episode_steps = Some(3);
    config.episodes = 1;
    let summary = run(&config, &AtomicBool::new(false))?;
    assert_eq!(summary.total_steps, 3);
    assert_eq!(summary.successes, 0);
    Ok(())
}

#[test]
fn task_config_loads_from_file() -> anyhow::Result<()> {
    let dir = temp_output("task");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("task.json");
    std::fs::write(&path, r#"{ "success_threshold": 0.08, "distance_scale": 4.0 }"#)?;

    let task = medsort::app::load_task(&path)?;
    assert!((task.success_threshold - 0.08).abs() < f32::EPSILON);
    assert!((task.distance_scale - 4.0).abs() < f32::EPSILON);
    assert_eq!(task.items, TaskConfig::default().items);

    std::fs::write(&path, r#"{ "success_threshold": -1.0 }"#)?;
    assert!(medsort::app::load_task(&path).is_err());
    assert!(medsort::app::load_task(&dir.join("missing.json")).is_err());

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
