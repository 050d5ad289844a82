//! Shared test helpers for `t3tracker-core` integration tests.
//!
//! In-memory fakes for every core port so the tracking and host tests can
//! focus on behaviour instead of wiring.

#![allow(dead_code)]

pub mod fakes;
