//! Logging setup and terminal helpers

pub mod display;
pub mod logging;
pub mod prompt;

pub use display::TerminalDisplay;
pub use logging::{init_tracing, log_command_execution};
pub use prompt::prompt_password;
