//! Match configuration and roster loader.

use std::path::Path;

use anyhow::Context;
use arena_core::{ArenaConfig, ArenaEngine, CombatantSpec};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Everything needed to build an [`ArenaEngine`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ArenaSetup {
    #[serde(rename = "match", default)]
    pub config: ArenaConfig,
    #[serde(rename = "combatant", default)]
    pub combatants: Vec<CombatantSpec>,
}

impl ArenaSetup {
    /// Builds a session from this setup, validating the roster.
    pub fn build_engine(&self) -> LoadResult<ArenaEngine> {
        ArenaEngine::new(self.config.clone(), &self.combatants)
            .context("Invalid arena roster")
    }
}

/// Loader for match configuration from TOML files.
///
/// ```toml
/// [match]
/// rounds_to_win = 2
/// round_duration = 60.0
///
/// [[combatant]]
/// name = "Ayla"
/// spawn = { x = -3.0, y = 0.0 }
/// ```
///
/// Every key of `[match]` and every combatant key except `name` is optional.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the match setup from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ArenaSetup> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid arena config {}", path.display()))
    }

    /// Parse a match setup from TOML text.
    pub fn parse(content: &str) -> LoadResult<ArenaSetup> {
        let setup: ArenaSetup = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        setup.config.validate()?;

        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let setup = ConfigLoader::parse(
            r#"
            [[combatant]]
            name = "Ayla"

            [[combatant]]
            name = "Bram"
            max_health = 12
            "#,
        )
        .unwrap();

        assert_eq!(setup.config, ArenaConfig::default());
        assert_eq!(setup.combatants.len(), 2);
        assert_eq!(setup.combatants[0].max_health, 10);
        assert_eq!(setup.combatants[0].damage_per_hit, 1);
        assert_eq!(setup.combatants[1].max_health, 12);
    }

    #[test]
    fn negative_delays_are_rejected() {
        let err = ConfigLoader::parse(
            r#"
            [match]
            round_end_delay = -1.0
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("round_end_delay"));
    }

    #[test]
    fn roster_errors_surface_when_building() {
        let setup = ConfigLoader::parse(
            r#"
            [[combatant]]
            name = "Solo"
            "#,
        )
        .unwrap();

        assert!(setup.build_engine().is_err());
    }
}
