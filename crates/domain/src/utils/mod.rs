//! Domain utilities

pub mod elapsed;

pub use elapsed::format_elapsed;
