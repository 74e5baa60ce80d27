//! Test harness for scripting configurator sessions.
//!
//! Drives the real session and dispatch path against a recording mock scene,
//! so tests can assert exactly which component functions ran.
//!
//! # Key Components
//!
//! - [`SessionDriver`]: Fluent API for editing parameters through the bridge
//!   and running cycles
//! - [`MockScene`]: Generator, positioner and painter for every component,
//!   recording each call
//! - [`helpers`]: Error type and the geometry snapshot builder
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod driver;
pub mod helpers;
pub mod scene;

pub use driver::SessionDriver;
pub use helpers::{FrameSnapshot, HarnessError};
pub use scene::{Call, MockArtifact, MockScene};
