//! Ambient settings layered over the merged rule manifests via environment
//! variables (the `FORGE_` prefix), grounded on the teacher's figment-based
//! config loading.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub parallel_jobs: Option<usize>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            log_level: None,
            parallel_jobs: None,
        }
    }
}

impl GlobalSettings {
    /// Layer `FORGE_`-prefixed environment variables over the defaults.
    pub fn from_env() -> Self {
        Figment::new()
            .merge(Serialized::defaults(GlobalSettings::default()))
            .merge(Env::prefixed("FORGE_"))
            .extract()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_falls_back_to_defaults() {
        std::env::remove_var("FORGE_LOG_LEVEL");
        std::env::remove_var("FORGE_PARALLEL_JOBS");
        let settings = GlobalSettings::from_env();
        assert!(settings.log_level.is_none());
        assert!(settings.parallel_jobs.is_none());
    }

    #[test]
    fn from_env_picks_up_parallel_jobs() {
        unsafe {
            std::env::set_var("FORGE_PARALLEL_JOBS", "4");
        }
        let settings = GlobalSettings::from_env();
        assert_eq!(settings.parallel_jobs, Some(4));
        unsafe {
            std::env::remove_var("FORGE_PARALLEL_JOBS");
        }
    }
}
