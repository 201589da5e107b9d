use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::ConfigError;
use crate::pomodoro::pomodoro::Phase;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Longest accepted phase: one week.
pub const MAX_DURATION_MINUTES: u64 = 7 * 24 * 60;

/// Sound cue files, one per phase-start event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudioCues {
    pub work: Option<PathBuf>,
    pub short_break: Option<PathBuf>,
    pub long_break: Option<PathBuf>,
}

impl AudioCues {
    pub fn for_phase(&self, phase: Phase) -> Option<&Path> {
        match phase {
            Phase::Work => self.work.as_deref(),
            Phase::ShortBreak => self.short_break.as_deref(),
            Phase::LongBreak => self.long_break.as_deref(),
        }
    }
}

/// Immutable settings for one process lifetime. Durations are whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub work_duration: u64,
    pub short_break_duration: u64,
    pub long_break_duration: u64,
    pub pomodoros_before_long_break: u32,
    pub text_for_long_break: String,
    pub audio_notification: bool,
    pub audio: AudioCues,
    pub audio_player: Option<String>,
    pub desktop_notification: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&data)?;

        // Relative cue paths resolve against the working directory, like the config path.
        if config.audio_notification {
            for phase in [Phase::Work, Phase::ShortBreak, Phase::LongBreak] {
                if let Some(file) = config.audio.for_phase(phase) {
                    if !file.exists() {
                        warn!(
                            phase = phase.as_str(),
                            file = %file.display(),
                            "audio cue file not found"
                        );
                    }
                }
            }
        }

        Ok(config)
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(data)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject);
        };

        let pomodoros_before_long_break = positive_int(&map, "pomodoros_before_long_break")?;
        let pomodoros_before_long_break =
            u32::try_from(pomodoros_before_long_break).map_err(|_| {
                ConfigError::invalid("pomodoros_before_long_break", "value is too large")
            })?;

        let audio_notification = required_bool(&map, "audio_notification")?;
        let audio = AudioCues {
            work: cue_path(&map, "audio_file_work", audio_notification)?,
            short_break: cue_path(&map, "audio_file_break", audio_notification)?,
            long_break: cue_path(&map, "audio_file_long_break", audio_notification)?,
        };

        Ok(Self {
            work_duration: duration_minutes(&map, "work_duration")?,
            short_break_duration: duration_minutes(&map, "short_break_duration")?,
            long_break_duration: duration_minutes(&map, "long_break_duration")?,
            pomodoros_before_long_break,
            text_for_long_break: required_string(&map, "text_for_long_break")?,
            audio_notification,
            audio,
            audio_player: optional_string(&map, "audio_player")?,
            desktop_notification: optional_bool(&map, "desktop_notification")?.unwrap_or(true),
        })
    }

    /// Configured length of `phase` in minutes.
    pub fn minutes_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_duration,
            Phase::ShortBreak => self.short_break_duration,
            Phase::LongBreak => self.long_break_duration,
        }
    }
}

fn required<'a>(
    map: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ConfigError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(ConfigError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn positive_int(map: &Map<String, Value>, field: &'static str) -> Result<u64, ConfigError> {
    let value = required(map, field)?;
    let Some(n) = value.as_i64() else {
        if value.as_u64().is_some() {
            return Err(ConfigError::invalid(field, "value is too large"));
        }
        return Err(ConfigError::invalid(
            field,
            format!("expected a positive integer, found {value}"),
        ));
    };
    if n <= 0 {
        return Err(ConfigError::invalid(
            field,
            format!("must be greater than zero, got {n}"),
        ));
    }
    Ok(n as u64)
}

fn duration_minutes(map: &Map<String, Value>, field: &'static str) -> Result<u64, ConfigError> {
    let minutes = positive_int(map, field)?;
    if minutes > MAX_DURATION_MINUTES {
        return Err(ConfigError::invalid(
            field,
            format!("must be at most {MAX_DURATION_MINUTES} minutes, got {minutes}"),
        ));
    }
    Ok(minutes)
}

fn required_bool(map: &Map<String, Value>, field: &'static str) -> Result<bool, ConfigError> {
    let value = required(map, field)?;
    value.as_bool().ok_or_else(|| {
        ConfigError::invalid(field, format!("expected true or false, found {value}"))
    })
}

fn optional_bool(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<bool>, ConfigError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => required_bool(map, field).map(Some),
    }
}

fn required_string(map: &Map<String, Value>, field: &'static str) -> Result<String, ConfigError> {
    let value = required(map, field)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid(field, format!("expected a string, found {value}")))
}

fn optional_string(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ConfigError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => required_string(map, field).map(Some),
    }
}

fn cue_path(
    map: &Map<String, Value>,
    field: &'static str,
    audio_notification: bool,
) -> Result<Option<PathBuf>, ConfigError> {
    let path = if audio_notification {
        Some(required_string(map, field)?)
    } else {
        optional_string(map, field)?
    };
    match path {
        Some(p) if p.trim().is_empty() => Err(ConfigError::invalid(field, "path is empty")),
        Some(p) => Ok(Some(PathBuf::from(p))),
        None => Ok(None),
    }
}
