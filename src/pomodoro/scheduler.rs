use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use super::pomodoro::{CycleState, Phase};
use super::timer::{Clock, run_timer};
use crate::config::Config;
use crate::display::{Display, ProgressReporter};
use crate::error::ConfigError;
use crate::notifier::Notifier;

/// Cooperative stop signal, checked between phases.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives the work → short/long break cycle and owns its counters.
pub struct PhaseScheduler<C, N, D, P> {
    config: Config,
    state: CycleState,
    clock: C,
    notifier: N,
    display: D,
    progress: P,
}

impl<C, N, D, P> PhaseScheduler<C, N, D, P>
where
    C: Clock,
    N: Notifier,
    D: Display,
    P: ProgressReporter,
{
    pub fn new(
        config: Config,
        clock: C,
        notifier: N,
        display: D,
        progress: P,
    ) -> Result<Self, ConfigError> {
        if config.pomodoros_before_long_break == 0 {
            return Err(ConfigError::invalid(
                "pomodoros_before_long_break",
                "must be greater than zero, got 0",
            ));
        }
        Ok(Self {
            config,
            state: CycleState::new(),
            clock,
            notifier,
            display,
            progress,
        })
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cycles forever until `cancel` is observed between two phases.
    pub async fn run(&mut self, cancel: &CancelToken) {
        info!(
            work = self.config.work_duration,
            short_break = self.config.short_break_duration,
            long_break = self.config.long_break_duration,
            threshold = self.config.pomodoros_before_long_break,
            "scheduler started"
        );

        while !cancel.is_cancelled() {
            self.run_work().await;
            if cancel.is_cancelled() {
                break;
            }
            let phase = self.state.next_break(self.config.pomodoros_before_long_break);
            self.run_break(phase).await;
        }

        info!(
            completed_in_cycle = self.state.completed_in_cycle,
            baskets_earned = self.state.baskets_earned,
            "scheduler stopped"
        );
    }

    /// One work interval followed by the break it earns. Returns that break.
    pub async fn run_cycle(&mut self) -> Phase {
        self.run_work().await;
        let phase = self.state.next_break(self.config.pomodoros_before_long_break);
        self.run_break(phase).await;
        phase
    }

    async fn run_work(&mut self) {
        self.state.begin_work();
        info!(
            pomodoro = self.state.completed_in_cycle,
            baskets = self.state.baskets_earned,
            "{} {} started",
            Phase::Work.emoji(),
            Phase::Work.as_str()
        );

        if let Err(e) = self.display.render(
            self.state.completed_in_cycle,
            self.state.baskets_earned,
            self.config.pomodoros_before_long_break,
        ) {
            warn!(error = %e, "failed to draw counters");
        }
        self.announce(Phase::Work);

        self.run_phase_timer(Phase::Work).await;
    }

    async fn run_break(&mut self, phase: Phase) {
        info!("{} {} started", phase.emoji(), phase.as_str());
        self.announce(phase);

        if phase == Phase::LongBreak {
            if let Err(e) = self.display.render_banner(&self.config.text_for_long_break) {
                warn!(error = %e, "failed to draw long break banner");
            }
        }

        self.run_phase_timer(phase).await;

        if phase == Phase::LongBreak {
            self.state.finish_long_break();
            info!(baskets = self.state.baskets_earned, "basket earned");
        }
    }

    async fn run_phase_timer(&mut self, phase: Phase) {
        let minutes = self.config.minutes_for(phase);
        run_timer(&self.clock, &mut self.progress, minutes, phase.label()).await;
    }

    fn announce(&mut self, phase: Phase) {
        if !self.config.audio_notification {
            return;
        }
        let Some(cue) = self.config.audio.for_phase(phase) else {
            return;
        };
        if let Err(e) = self.notifier.notify(phase, cue) {
            warn!(phase = phase.as_str(), error = %e, "notification failed");
        }
    }
}
