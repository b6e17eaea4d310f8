//! Boundary to the remote platform API.
//!
//! The rest of the core talks to the platform exclusively through the
//! [`Session`] trait, so tests can substitute a scripted in-memory
//! implementation. [`HttpSession`] is the real one.

pub mod http;

use serde_json::Value;

use crate::error::Result;
use crate::models::{Environment, Site, Workflow, WorkflowUpdate};

/// Authenticated access to the platform registry and workflow API.
///
/// All calls are a single round trip; none of them retry.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Every site the authenticated user may operate on, in the platform's
    /// enumeration order.
    async fn sites(&self) -> Result<Vec<Site>>;

    /// Look up one site by name.
    async fn site(&self, name: &str) -> Result<Site>;

    /// A site's environments, raw and unordered.
    async fn environments(&self, site: &Site) -> Result<Vec<Environment>>;

    /// Submit a named remote operation against an environment. Returns the
    /// workflow handle without waiting for the operation to finish.
    async fn submit_workflow(
        &self,
        site_id: &str,
        environment_id: &str,
        operation: &str,
        params: Value,
    ) -> Result<Workflow>;

    /// Fetch the current status of a workflow. One round trip, no retry.
    async fn fetch_workflow(&self, workflow: &Workflow) -> Result<WorkflowUpdate>;
}

pub use http::HttpSession;
