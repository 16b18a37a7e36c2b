//! Headless driver for the juggling core.
//!
//! This crate stands in for the external render/physics host: it applies
//! the session's host commands, integrates gravity for free-flying balls,
//! and reports hand/ball contact-begin events back to the core.

pub mod host;
