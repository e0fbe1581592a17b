//! Error types for the game runner binary.
//!
//! [`EngineError`] wraps every failure mode of loading a game and playing
//! its script, so that `main` can propagate with `?`.

/// Top-level error for the game runner binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wakkerdam_core::ConfigError,
    },

    /// The configured game cannot be set up.
    #[error("setup error: {source}")]
    Setup {
        /// The underlying setup error.
        #[from]
        source: wakkerdam_core::SetupError,
    },

    /// A scripted step was rejected by the session.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: wakkerdam_core::SessionError,
    },

    /// The `script` section could not be read.
    #[error("script error: {message}")]
    Script {
        /// Description of the script failure.
        message: String,
    },
}
