//! Session host

pub mod service;

pub use service::{DeliveryReport, HostPorts, SessionHost, TrackingReport};
