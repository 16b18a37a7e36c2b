//! Deterministic juggling simulation core.
//!
//! Two hands travel tilted elliptical paths, catching and throwing balls
//! that fly under the host's gravity between catches. The host drives
//! [`session::Session::advance`] once per frame and feeds contact events
//! back through [`session::Session::contact_began`].

pub mod ball;
pub mod config;
pub mod ellipse;
pub mod hand;
pub mod scheduler;
pub mod session;
pub mod vec3;
