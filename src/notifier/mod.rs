pub mod desktop;
pub mod sound;

use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::error::NotificationError;
use crate::pomodoro::pomodoro::Phase;
use desktop::send_notification;
use sound::SoundPlayer;

/// Fire-and-forget cue raised when a phase starts.
pub trait Notifier {
    fn notify(&mut self, phase: Phase, audio: &Path) -> Result<(), NotificationError>;
}

/// Plays the phase's sound cue and, optionally, pops a desktop notification.
pub struct SystemNotifier {
    player: SoundPlayer,
    desktop: bool,
    text: NotificationText,
}

/// Durations quoted in the desktop notification body.
struct NotificationText {
    work: u64,
    short_break: u64,
    long_break: u64,
}

impl SystemNotifier {
    pub fn from_config(config: &Config) -> Self {
        let player = match &config.audio_player {
            Some(command) => SoundPlayer::new(command.clone()),
            None => SoundPlayer::platform_default(),
        };
        Self {
            player,
            desktop: config.desktop_notification,
            text: NotificationText {
                work: config.work_duration,
                short_break: config.short_break_duration,
                long_break: config.long_break_duration,
            },
        }
    }

    fn message(&self, phase: Phase) -> String {
        match phase {
            Phase::Work => format!(
                "Time to focus! Starting {}-minute work session.",
                self.text.work
            ),
            Phase::ShortBreak => format!(
                "Work session complete! Take a {}-minute break.",
                self.text.short_break
            ),
            Phase::LongBreak => format!(
                "Basket complete! Enjoy a {}-minute long break.",
                self.text.long_break
            ),
        }
    }
}

impl Notifier for SystemNotifier {
    fn notify(&mut self, phase: Phase, audio: &Path) -> Result<(), NotificationError> {
        // The popup is best-effort; the sound cue decides the result.
        if self.desktop {
            if let Err(e) = send_notification(&self.message(phase)) {
                debug!(error = %e, "desktop notification skipped");
            }
        }
        self.player.play(audio)
    }
}
