use chrono::{DateTime, Local, TimeDelta};
use std::io::{self, Stdout, Write};

use super::{Display, ProgressReporter, font};
use crate::error::DisplayError;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
const BAR_WIDTH: usize = 30;

const TOMATO_ART: &str = r"
   ,--./,-.
  / #      \
 |          |
  \        /
   `._,._,'
";

/// Draws screens and progress lines on a terminal-like writer.
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn clear(&mut self) -> io::Result<()> {
        write!(self.out, "{CLEAR_SCREEN}")
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn render(
        &mut self,
        completed_in_cycle: u32,
        baskets_earned: u32,
        threshold: u32,
    ) -> Result<(), DisplayError> {
        self.clear()?;
        writeln!(self.out, "{TOMATO_ART}")?;
        writeln!(self.out, "{}", font::render(&format!("{completed_in_cycle} / {threshold}")))?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", font::render(&format!("{baskets_earned} baskets")))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn render_banner(&mut self, text: &str) -> Result<(), DisplayError> {
        self.clear()?;
        writeln!(self.out, "{}", font::render(text))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ProgressReporter for TerminalDisplay<W> {
    fn start(&mut self, _label: &str, total_seconds: u64) -> Result<(), DisplayError> {
        let minutes = total_seconds / 60;
        match end_time(Local::now(), total_seconds) {
            Some(until) => writeln!(
                self.out,
                "For {} minutes (until {}).",
                minutes,
                until.format("%H:%M")
            )?,
            None => writeln!(self.out, "For {} minutes.", minutes)?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn report_tick(
        &mut self,
        current_second: u64,
        total_seconds: u64,
        label: &str,
    ) -> Result<(), DisplayError> {
        write!(self.out, "\r{}", progress_line(current_second, total_seconds, label))?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self, _label: &str) -> Result<(), DisplayError> {
        writeln!(self.out)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Wall-clock end of a timer, or `None` when it falls outside chrono's range.
fn end_time(now: DateTime<Local>, total_seconds: u64) -> Option<DateTime<Local>> {
    let seconds = i64::try_from(total_seconds).ok()?;
    now.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

fn clock_format(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// `Working:  50%|███████████████               | 30/60 [00:30<00:30]`
pub(crate) fn progress_line(current: u64, total: u64, label: &str) -> String {
    let ratio = if total == 0 {
        1.0
    } else {
        current.min(total) as f64 / total as f64
    };
    let filled = (ratio * BAR_WIDTH as f64).floor() as usize;
    let bar = format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH - filled));
    format!(
        "{}: {:>3}%|{}| {}/{} [{}<{}]",
        label,
        (ratio * 100.0).floor() as u64,
        bar,
        current,
        total,
        clock_format(current),
        clock_format(total.saturating_sub(current)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line() {
        let line = progress_line(30, 60, "Working");
        assert!(line.starts_with("Working:  50%|"));
        assert!(line.ends_with("| 30/60 [00:30<00:30]"));
        assert_eq!(line.matches('█').count(), BAR_WIDTH / 2);

        let done = progress_line(120, 120, "Long break");
        assert!(done.starts_with("Long break: 100%|"));
        assert_eq!(done.matches('█').count(), BAR_WIDTH);
        assert!(done.ends_with("[02:00<00:00]"));
    }

    #[test]
    fn test_start_without_end_time_when_out_of_range() {
        let now = Local::now();
        assert!(end_time(now, 25 * 60).is_some());
        assert!(end_time(now, 1_000_000_000_000 * 60).is_none());
        assert!(end_time(now, u64::MAX).is_none());

        let mut display = TerminalDisplay::new(Vec::new());
        display.start("Working", 1_000_000_000_000 * 60).unwrap();
        let out = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(out, "For 1000000000000 minutes.\n");
    }

    #[test]
    fn test_render_clears_and_draws_counters() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.render(3, 1, 4).unwrap();
        let out = String::from_utf8(display.into_inner()).unwrap();

        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains(",--./,-."));
        assert!(out.contains(&font::render("3 / 4")));
        assert!(out.contains(&font::render("1 BASKETS")));
    }

    #[test]
    fn test_banner_clears_screen() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.render_banner("Long Break!").unwrap();
        let out = String::from_utf8(display.into_inner()).unwrap();

        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains(&font::render("LONG BREAK!")));
        assert_eq!(out.matches(CLEAR_SCREEN).count(), 1);
    }

    #[test]
    fn test_ticks_redraw_one_line() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.start("Short break", 60).unwrap();
        for second in 1..=60 {
            display.report_tick(second, 60, "Short break").unwrap();
        }
        display.finish("Short break").unwrap();
        let out = String::from_utf8(display.into_inner()).unwrap();

        assert!(out.starts_with("For 1 minutes (until "));
        assert_eq!(out.matches('\r').count(), 60);
        assert!(out.contains("60/60 [01:00<00:00]"));
        assert!(out.ends_with("\n\n"));
    }
}
