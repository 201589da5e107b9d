use std::path::Path;
use std::process::{Child, Command, Stdio};
use tracing::debug;

use crate::error::NotificationError;

/// Plays cue files through an external player, one cue at a time.
#[derive(Debug)]
pub struct SoundPlayer {
    command: Option<String>,
    current: Option<Child>,
}

impl SoundPlayer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            current: None,
        }
    }

    pub fn platform_default() -> Self {
        let command = if cfg!(target_os = "macos") {
            Some("afplay")
        } else if cfg!(unix) {
            Some("paplay")
        } else {
            None
        };
        Self {
            command: command.map(str::to_string),
            current: None,
        }
    }

    /// Starts `file` and returns immediately. A cue still playing is cut off.
    pub fn play(&mut self, file: &Path) -> Result<(), NotificationError> {
        if !file.is_file() {
            return Err(NotificationError::MissingAudio(file.to_path_buf()));
        }
        let Some(command) = self.command.clone() else {
            return Err(NotificationError::NoPlayer);
        };

        self.stop();

        let child = Command::new(&command)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NotificationError::Player {
                player: command.clone(),
                source,
            })?;
        debug!(player = %command, file = %file.display(), pid = child.id(), "cue started");
        self.current = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            // reap
            let _ = child.wait();
        }
    }
}

impl Drop for SoundPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
