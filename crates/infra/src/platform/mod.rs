//! Host platform adapters

pub mod system_info;

pub use system_info::HostSystemInfo;
