pub mod pomodoro;
pub mod scheduler;
pub mod timer;
