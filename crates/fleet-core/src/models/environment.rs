//! Environment entity with its classification predicates.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::Result;
use crate::models::site::SiteRef;
use crate::models::workflow::Workflow;
use crate::session::Session;

/// The three fixed environment ids every site starts with, in canonical
/// order. Anything else is a multidev environment.
pub const DEFAULT_ENVIRONMENTS: [&str; 3] = ["dev", "test", "live"];

/// Upstream tracking data computed by the platform. The core never computes
/// this; it only consults it when filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamStatus {
    /// Number of upstream commits the environment's code is behind.
    #[serde(default)]
    pub behind: u64,
}

/// One environment of a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub site: SiteRef,
    #[serde(default)]
    pub upstream: Option<UpstreamStatus>,
}

impl Environment {
    /// True for any dynamically created environment, i.e. any id other than
    /// `dev`, `test`, or `live`.
    pub fn is_multidev(&self) -> bool {
        !DEFAULT_ENVIRONMENTS.contains(&self.id.as_str())
    }

    /// True for `dev` and every multidev environment. `test` and `live` are
    /// deployment targets, not development environments.
    pub fn is_development(&self) -> bool {
        self.id == "dev" || self.is_multidev()
    }

    /// Whether the platform reports pending upstream commits for this
    /// environment.
    pub fn has_upstream_updates(&self) -> bool {
        self.upstream.as_ref().is_some_and(|u| u.behind > 0)
    }

    /// Submit the "apply upstream updates" workflow for this environment.
    ///
    /// Returns the workflow handle immediately; the remote operation runs
    /// asynchronously and is tracked by polling the handle.
    pub async fn apply_upstream_updates<S: Session>(
        &self,
        session: &S,
        updatedb: bool,
        accept_upstream: bool,
    ) -> Result<Workflow> {
        let params = json!({
            "updatedb": updatedb,
            "xoption": if accept_upstream { "theirs" } else { "mine" },
        });
        session
            .submit_workflow(&self.site.id, &self.id, "apply_upstream_updates", params)
            .await
    }

    /// JSON view used by listings and reports.
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id,
            "site": self.site.name,
            "multidev": self.is_multidev(),
            "development": self.is_development(),
            "upstream_updates": self.has_upstream_updates(),
        })
    }
}
