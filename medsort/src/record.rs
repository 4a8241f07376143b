//! Episode trajectory recording.
//!
//! Every episode becomes one `episode_NNN.json` file holding the camera the
//! run rendered through and, per step, the batched rewards and flags together
//! with the item poses of instance 0.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use physics::{CameraSpec, Pose};
use serde::Serialize;
use tasks::medicine_sort::Category;
use tasks::StepOutput;

/// Pose of one item in the recorded instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemPose {
    pub category: Category,
    pub pose: Pose,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepRecord {
    pub step: u32,
    pub reward: Vec<f32>,
    pub success: Vec<bool>,
    pub terminated: Vec<bool>,
    pub truncated: Vec<bool>,
    /// Number of frames rendered after the step
    pub frames: usize,
    pub items: Vec<ItemPose>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeRecord {
    pub episode: u32,
    pub camera: CameraSpec,
    pub success: bool,
    pub steps: Vec<StepRecord>,
}

/// Collects the steps of a single episode.
pub struct EpisodeRecorder {
    record: EpisodeRecord,
}

impl EpisodeRecorder {
    #[must_use]
    pub fn new(episode: u32, camera: CameraSpec) -> Self {
        Self {
            record: EpisodeRecord {
                episode,
                camera,
                success: false,
                steps: Vec::new(),
            },
        }
    }

    pub fn record_step(&mut self, out: &StepOutput, frames: usize, items: Vec<ItemPose>) {
        let step = u32::try_from(self.record.steps.len()).unwrap_or(u32::MAX);
        self.record.steps.push(StepRecord {
            step,
            reward: out.reward.clone(),
            success: out.info.success.clone(),
            terminated: out.terminated.clone(),
            truncated: out.truncated.clone(),
            frames,
            items,
        });
    }

    pub fn set_success(&mut self, success: bool) {
        self.record.success = success;
    }

    #[must_use]
    pub fn record(&self) -> &EpisodeRecord {
        &self.record
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("episode_{:03}.json", self.record.episode)
    }

    /// Write the episode into `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(&self.record)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
