use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal: the configuration could not be turned into a runnable schedule.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Recoverable: a phase-start cue could not be delivered.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("audio file {} not found", .0.display())]
    MissingAudio(PathBuf),

    #[error("no audio player available on this platform; set `audio_player`")]
    NoPlayer,

    #[error("failed to start audio player `{player}`: {source}")]
    Player {
        player: String,
        #[source]
        source: io::Error,
    },

    #[error("desktop notification failed: {0}")]
    Desktop(String),
}

/// Recoverable: the terminal could not be drawn to.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),
}
