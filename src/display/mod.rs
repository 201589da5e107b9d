pub mod font;
pub mod terminal;

use crate::error::DisplayError;

/// Full-screen output. Both calls clear whatever was drawn before.
pub trait Display {
    fn render(
        &mut self,
        completed_in_cycle: u32,
        baskets_earned: u32,
        threshold: u32,
    ) -> Result<(), DisplayError>;

    fn render_banner(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// Elapsed-time feedback for a running timer.
pub trait ProgressReporter {
    fn start(&mut self, _label: &str, _total_seconds: u64) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Called once per elapsed second, `current_second` counting from 1.
    fn report_tick(
        &mut self,
        current_second: u64,
        total_seconds: u64,
        label: &str,
    ) -> Result<(), DisplayError>;

    fn finish(&mut self, _label: &str) -> Result<(), DisplayError> {
        Ok(())
    }
}
