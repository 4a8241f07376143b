//! Dense reward shaping.
//!
//! Every item contributes `1 - tanh(scale * d)`, which is 1 at its bin and
//! decays toward 0 with distance. On success the sum is replaced by a fixed
//! bonus so the signal saturates at completion.

use super::evaluate::Evaluation;
use super::task::TaskConfig;
use crate::config::RewardMode;

/// Shaping term of a single item at planar distance `distance`.
///
/// In `[0, 1]`. `tanh` saturates to 1.0 in f32 once `scale * distance`
/// passes about 9, so items that far from their bin contribute exactly 0.
#[must_use]
pub fn shaping_term(distance: f32, scale: f32) -> f32 {
    1.0 - (scale * distance).tanh()
}

/// Dense reward per instance: shaping sum, or the bonus where successful.
#[must_use]
pub fn dense_reward(eval: &Evaluation, task: &TaskConfig) -> Vec<f32> {
    let mut reward = vec![0.0; eval.success.len()];
    for item in &eval.items {
        for (r, &d) in reward.iter_mut().zip(&item.distances) {
            *r += shaping_term(d, task.distance_scale);
        }
    }
    for (r, &success) in reward.iter_mut().zip(&eval.success) {
        if success {
            *r = task.success_bonus;
        }
    }
    reward
}

/// Dense reward divided by the maximum achievable reward.
#[must_use]
pub fn normalized_dense_reward(eval: &Evaluation, task: &TaskConfig) -> Vec<f32> {
    dense_reward(eval, task)
        .into_iter()
        .map(|r| r / task.max_reward)
        .collect()
}

/// 1 where successful, 0 elsewhere.
#[must_use]
pub fn sparse_reward(eval: &Evaluation) -> Vec<f32> {
    eval.success.iter().map(|&s| if s { 1.0 } else { 0.0 }).collect()
}

/// Reward reported for `mode`.
#[must_use]
pub fn compute_reward(mode: RewardMode, eval: &Evaluation, task: &TaskConfig) -> Vec<f32> {
    match mode {
        RewardMode::None => vec![0.0; eval.success.len()],
        RewardMode::Sparse => sparse_reward(eval),
        RewardMode::Dense => dense_reward(eval, task),
        RewardMode::NormalizedDense => normalized_dense_reward(eval, task),
    }
}
