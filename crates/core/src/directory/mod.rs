//! Project/task directory ports

pub mod ports;

pub use ports::ProjectDirectory;
