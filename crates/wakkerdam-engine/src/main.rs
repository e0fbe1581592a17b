//! Game runner binary for Quantum Wakkerdam.
//!
//! Loads a game from YAML, plays the scripted periods it contains, and logs
//! what the village would see: the period reports, every player's role and
//! death odds, and the result.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `wakkerdam-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing), defaulting to the configured
//!    level when `RUST_LOG` is unset
//! 3. Set up the game session and its world ensemble
//! 4. Load the `script` section
//! 5. Play the script
//! 6. Log the result

mod error;
mod script;
mod summary;

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;
use wakkerdam_core::{GameConfig, GameSession};

use crate::error::EngineError;
use crate::script::ScriptEnd;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG: &str = "wakkerdam-config.yaml";

/// Application entry point for the game runner.
///
/// # Errors
///
/// Returns an error if the configuration is unusable or a scripted step is
/// rejected by the session.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let (config, contents) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        path = %config_path.display(),
        found = contents.is_some(),
        "wakkerdam-engine starting"
    );
    info!(
        game = config.game.name,
        world_count = config.game.world_count,
        seed = ?config.game.seed,
        players = config.game.players.len(),
        "Configuration loaded"
    );

    // 3. Set up the game session.
    let mut session = GameSession::new(&config)?;
    info!(
        worlds = session.worlds().len(),
        requested = session.worlds().requested_world_count(),
        "Game session ready"
    );

    // 4. Load the script.
    let periods = contents
        .as_deref()
        .map(script::parse)
        .transpose()?
        .unwrap_or_default();
    info!(periods = periods.len(), "Script loaded");

    // 5. Play.
    match script::play(&mut session, &periods)? {
        ScriptEnd::Won(period) => info!(period, "Game won during the script"),
        ScriptEnd::Exhausted => info!("Script exhausted without a winner"),
    }

    // 6. Log results.
    summary::log_percentages(&session);
    summary::log_result(&session);

    Ok(())
}

/// Load the game configuration and keep the raw document for the script.
///
/// A missing file yields the default configuration and no script.
fn load_config(path: &Path) -> Result<(GameConfig, Option<String>), EngineError> {
    if !path.exists() {
        return Ok((GameConfig::default(), None));
    }
    let contents = std::fs::read_to_string(path).map_err(wakkerdam_core::ConfigError::from)?;
    let config = GameConfig::parse(&contents)?;
    Ok((config, Some(contents)))
}
