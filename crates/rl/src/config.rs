use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{EnvError, RewardConfig};

/// Environment settings. Every field has a default, so a partial JSON
/// document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Linear lattice size `L`.
    pub size: usize,
    /// Metropolis temperature `kT`.
    pub temperature: f64,
    /// Coupling `J`, passed through to whoever builds the simulator.
    pub coupling: f64,
    /// Warmup sweeps run before the first episode.
    pub mc_steps: usize,
    pub loop_log: PathBuf,
    pub render_log: PathBuf,
    /// Seed for reset-site draws. Entropy-seeded when absent.
    pub seed: Option<u64>,
    pub reward: RewardConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            size: 32,
            temperature: 1.0,
            coupling: 1.0,
            mc_steps: 2000,
            loop_log: PathBuf::from("loop_sites.log"),
            render_log: PathBuf::from("loop_renders.log"),
            seed: None,
            reward: RewardConfig::default(),
        }
    }
}

impl EnvConfig {
    /// # Errors
    ///
    /// Returns [`EnvError::Config`] on malformed JSON and
    /// [`EnvError::InvalidConfig`] if the values fail [`EnvConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// As [`EnvConfig::from_json`], plus [`EnvError::Io`] if the file cannot
    /// be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// # Errors
    ///
    /// Returns [`EnvError::InvalidConfig`] naming the first bad field.
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.size == 0 {
            return Err(EnvError::InvalidConfig("size must be positive".into()));
        }
        if self.temperature.is_nan() || self.temperature <= 0.0 {
            return Err(EnvError::InvalidConfig("temperature must be positive".into()));
        }
        if self.reward.loop_normalizer == 0.0 {
            return Err(EnvError::InvalidConfig("reward.loop_normalizer must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EnvConfig::from_json(r#"{"size": 8, "reward": {"scaling": 1.0}}"#).unwrap();
        assert_eq!(config.size, 8);
        assert_eq!(config.mc_steps, 2000);
        assert_eq!(config.reward.scaling, 1.0);
        assert_eq!(config.reward.energy_weight, -1.0);
        assert_eq!(config.loop_log, PathBuf::from("loop_sites.log"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(EnvConfig::from_json(r#"{"size": 0}"#), Err(EnvError::InvalidConfig(_))));
        assert!(matches!(
            EnvConfig::from_json(r#"{"temperature": -1.0}"#),
            Err(EnvError::InvalidConfig(_))
        ));
        assert!(matches!(
            EnvConfig::from_json(r#"{"reward": {"loop_normalizer": 0.0}}"#),
            Err(EnvError::InvalidConfig(_))
        ));
        assert!(matches!(EnvConfig::from_json("{size}"), Err(EnvError::Config(_))));
    }

    #[test]
    fn serializes_back_to_json() {
        let config = EnvConfig { seed: Some(7), ..EnvConfig::default() };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EnvConfig::from_json(&json).unwrap(), config);
    }
}
