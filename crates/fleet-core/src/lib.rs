//! Fleet Core Library
//!
//! Orchestration layer for applying upstream code updates across a
//! hosted-site fleet: resolves loosely-specified targets into ordered sets
//! of eligible environments and tracks the resulting batch of asynchronous
//! remote workflows to completion.

pub mod collections;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod queue;
pub mod session;
pub mod targeting;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, FleetConfig};

    // Errors
    pub use crate::error::{Error, Result};

    // Models
    pub use crate::models::{Environment, Site, SiteRef, UpstreamStatus, Workflow, WorkflowUpdate};

    // Collections
    pub use crate::collections::Environments;

    // Targeting
    pub use crate::targeting::{TargetResolver, parse_site_env};

    // Queue
    pub use crate::queue::WorkflowQueue;

    // Session
    pub use crate::session::{HttpSession, Session};
}
