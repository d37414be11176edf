//! Configuration types for minibuild

use serde::{Deserialize, Serialize};

/// Task runner configuration (worker pool sizing)
///
/// Groups settings related to how task groups are dispatched. Used by
/// [`TaskRunner`](crate::runner::TaskRunner); the embedding application
/// decides where the values come from (flags, files, environment).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Maximum tasks executing at once in concurrent mode
    /// (default: available parallelism)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_tasks: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: default_max_concurrent(),
        }
    }
}

fn default_max_concurrent() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}
