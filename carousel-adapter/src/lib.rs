//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and clock-free: it owns the track math and the
//! drag/settle state machine. This crate provides the small, framework-neutral pieces an
//! adapter needs on top of it:
//!
//! - A damped [`Spring`] that animates the settle, seeded with the release velocity
//! - A [`VelocityTracker`] that turns timestamped pointer moves into a release velocity
//! - Center anchoring across item-list changes ([`CenterAnchor`])
//! - A [`Controller`] that wires these together behind `on_*` event methods and `tick(now_ms)`
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/iced bindings).
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod spring;
mod velocity;

#[cfg(test)]
mod tests;

pub use anchor::{CenterAnchor, apply_center_anchor, capture_center_anchor};
pub use controller::Controller;
pub use spring::Spring;
pub use velocity::{DEFAULT_WINDOW_MS, MAX_FLING_VELOCITY, VelocityTracker};
