//! Entities mirrored from the remote platform.
//!
//! All of these are read-only views for the core: sites and environments are
//! created and mutated by the platform, and a [`Workflow`] only changes
//! through its own `refresh`.

pub mod environment;
pub mod site;
pub mod workflow;

pub use environment::{Environment, UpstreamStatus};
pub use site::{Site, SiteRef};
pub use workflow::{Workflow, WorkflowUpdate};
