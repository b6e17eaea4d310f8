//! High-level commands for fleet operations.
//!
//! This module is the public API consumed by frontends: resolve targets,
//! drive the workflow batch, and hand back a report. The CLI only renders.

pub mod apply;
pub mod env_list;
pub mod multidev_create;

pub use apply::{ApplyCommand, ApplyOptions, ApplyReport};
pub use env_list::{EnvListCommand, EnvListOptions};
pub use multidev_create::{MultidevCreateCommand, MultidevCreateOptions, MultidevCreateReport};
