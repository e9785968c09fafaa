use std::path::PathBuf;

use skirmish_core::constants::TICK_RATE;
use skirmish_sim::{ConfigError, SimConfig};

/// Host configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON scenario file; the built-in map when absent
    pub scenario: Option<PathBuf>,
    /// Overrides the scenario's seed
    pub seed: Option<u64>,
    /// Stop after this many ticks; run until shut down when absent
    pub ticks: Option<u64>,
    /// Ticks per second. 0 runs unpaced, as fast as possible
    pub tick_rate: u32,
    /// Log a summary every N ticks (0 disables)
    pub report_every: u64,
    /// Read JSON host commands from stdin, one per line
    pub stdin_commands: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            seed: None,
            ticks: None,
            tick_rate: TICK_RATE,
            report_every: TICK_RATE as u64 * 10,
            stdin_commands: false,
        }
    }
}

impl AppConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("SKIRMISH_SCENARIO") {
            if !path.trim().is_empty() {
                config.scenario = Some(PathBuf::from(path));
            }
        }

        if let Some(seed) = lookup("SKIRMISH_SEED") {
            match seed.parse::<u64>() {
                Ok(parsed) => config.seed = Some(parsed),
                Err(_) => tracing::warn!("Invalid SKIRMISH_SEED '{}', using scenario seed", seed),
            }
        }

        if let Some(ticks) = lookup("SKIRMISH_TICKS") {
            match ticks.parse::<u64>() {
                Ok(0) => config.ticks = None,
                Ok(parsed) => config.ticks = Some(parsed),
                Err(_) => tracing::warn!("Invalid SKIRMISH_TICKS '{}', running until stopped", ticks),
            }
        }

        if let Some(rate) = lookup("SKIRMISH_TICK_RATE") {
            match rate.parse::<u32>() {
                Ok(parsed) if parsed <= 1000 => config.tick_rate = parsed,
                Ok(_) => tracing::warn!("SKIRMISH_TICK_RATE must be 0-1000, using default"),
                Err(_) => tracing::warn!("Invalid SKIRMISH_TICK_RATE '{}', using default", rate),
            }
        }

        if let Some(every) = lookup("SKIRMISH_REPORT_EVERY") {
            match every.parse::<u64>() {
                Ok(parsed) => config.report_every = parsed,
                Err(_) => tracing::warn!("Invalid SKIRMISH_REPORT_EVERY '{}', using default", every),
            }
        }

        if let Some(flag) = lookup("SKIRMISH_STDIN_COMMANDS") {
            config.stdin_commands = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Resolve the simulation config: scenario file (or default) plus overrides.
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        let mut sim = match &self.scenario {
            Some(path) => SimConfig::from_path(path)?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            sim.seed = seed;
        }
        Ok(sim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert!(config.scenario.is_none());
        assert!(config.ticks.is_none());
        assert!(!config.stdin_commands);
    }

    #[test]
    fn test_overrides_apply() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SKIRMISH_SEED", "99"),
            ("SKIRMISH_TICKS", "500"),
            ("SKIRMISH_TICK_RATE", "0"),
            ("SKIRMISH_REPORT_EVERY", "100"),
            ("SKIRMISH_STDIN_COMMANDS", "true"),
        ]));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.ticks, Some(500));
        assert_eq!(config.tick_rate, 0);
        assert_eq!(config.report_every, 100);
        assert!(config.stdin_commands);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SKIRMISH_SEED", "abc"),
            ("SKIRMISH_TICK_RATE", "5000"),
            ("SKIRMISH_TICKS", "-1"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_seed_override_reaches_sim_config() {
        let config = AppConfig {
            seed: Some(7),
            ..Default::default()
        };
        let sim = config.sim_config().unwrap();
        assert_eq!(sim.seed, 7);
        assert_eq!(sim.islands.len(), 5);
    }

    #[test]
    fn test_missing_scenario_is_an_error() {
        let config = AppConfig {
            scenario: Some(PathBuf::from("/nonexistent/scenario.json")),
            ..Default::default()
        };
        assert!(matches!(config.sim_config(), Err(ConfigError::Io { .. })));
    }
}
