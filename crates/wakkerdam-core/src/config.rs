//! Configuration loading and typed config structures for a Quantum Wakkerdam
//! game.
//!
//! The canonical configuration lives in `wakkerdam-config.yaml` at the
//! project root. The structs here mirror the YAML layout; every field has a
//! default so that a partial file (or an empty one) still loads. Sections
//! this crate does not know about (such as the engine's `script`) are
//! ignored.

use std::path::Path;

use serde::Deserialize;
use wakkerdam_types::Role;
use wakkerdam_world::ResolutionRules;

/// Largest ensemble a configuration may request.
pub const MAX_WORLD_COUNT: usize = 50_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The YAML parsed but describes an unusable game.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Game setup: name, ensemble size, seed, players and roles.
    #[serde(default)]
    pub game: GameSection,

    /// Bounds on the number of players.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Resolution switches for the ambiguous night rules.
    #[serde(default)]
    pub rules: ResolutionRules,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values are out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the values are out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// Player and role counts are checked later, when the session is built,
    /// so that a config can be loaded before the roster is filled in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_WORLD_COUNT).contains(&self.game.world_count) {
            return Err(ConfigError::Invalid(format!(
                "game.world_count must be between 1 and {MAX_WORLD_COUNT}, got {}",
                self.game.world_count
            )));
        }
        if self.limits.min_players > self.limits.max_players {
            return Err(ConfigError::Invalid(format!(
                "limits.min_players ({}) exceeds limits.max_players ({})",
                self.limits.min_players, self.limits.max_players
            )));
        }
        Ok(())
    }
}

/// The `game` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSection {
    /// Human-readable game name.
    #[serde(default = "default_game_name")]
    pub name: String,

    /// Number of worlds to generate before de-duplication.
    #[serde(default = "default_world_count")]
    pub world_count: usize,

    /// Seed for the game's random generator. Absent means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Player names in seating order.
    #[serde(default)]
    pub players: Vec<String>,

    /// Role multiset, one entry per player.
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            name: default_game_name(),
            world_count: default_world_count(),
            seed: None,
            players: Vec::new(),
            roles: Vec::new(),
        }
    }
}

/// The `limits` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    /// Fewest players a game may have.
    #[serde(default = "default_min_players")]
    pub min_players: usize,

    /// Most players a game may have.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_players: default_min_players(),
            max_players: default_max_players(),
        }
    }
}

/// The `logging` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_game_name() -> String {
    "Quantum Wakkerdam".to_owned()
}

const fn default_world_count() -> usize {
    100
}

const fn default_min_players() -> usize {
    5
}

const fn default_max_players() -> usize {
    35
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.game.name, "Quantum Wakkerdam");
        assert_eq!(config.game.world_count, 100);
        assert_eq!(config.game.seed, None);
        assert_eq!(config.limits.min_players, 5);
        assert_eq!(config.limits.max_players, 35);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.rules, ResolutionRules::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
game:
  name: Friday night
  world_count: 2500
  seed: 42
  players: [Ada, Bas, Cor, Dirk, Eva]
  roles: [werewolf, seer, villager, hunter, apprentice_seer]
limits:
  min_players: 3
  max_players: 12
rules:
  bless_decays_each_night: true
logging:
  level: debug
script:
  - night: []
";
        let config = GameConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.game.name, "Friday night");
        assert_eq!(config.game.world_count, 2500);
        assert_eq!(config.game.seed, Some(42));
        assert_eq!(config.game.players.len(), 5);
        assert_eq!(config.game.roles.get(4), Some(&Role::ApprenticeSeer));
        assert_eq!(config.limits.max_players, 12);
        assert!(config.rules.bless_decays_each_night);
        assert!(!config.rules.mutual_kill_requires_death);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = GameConfig::parse("game:\n  seed: 7\n");
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(config.game.world_count, 100);
        assert_eq!(config.limits.min_players, 5);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(GameConfig::parse("").is_ok());
    }

    #[test]
    fn rejects_out_of_range_world_count() {
        let result = GameConfig::parse("game:\n  world_count: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        let result = GameConfig::parse("game:\n  world_count: 50001\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_inverted_limits() {
        let result = GameConfig::parse("limits:\n  min_players: 9\n  max_players: 4\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_role() {
        let result = GameConfig::parse("game:\n  roles: [werewolf, vampire]\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("wakkerdam-config.yaml");
        if path.exists() {
            let config = GameConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
