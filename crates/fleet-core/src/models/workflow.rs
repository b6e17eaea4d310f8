//! Handle for one asynchronous remote workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Session;

/// Status/terminal snapshot returned by a single fetch round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowUpdate {
    pub status: String,
    pub finished: bool,
}

/// One asynchronous remote operation, tracked by polling.
///
/// The handle is only ever mutated by [`Workflow::refresh`], which performs
/// exactly one round trip. Once `finished` is set the handle is never
/// refreshed again and its state is final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub site_id: String,
    /// Id of the environment the workflow runs against.
    pub environment: String,
    pub status: String,
    pub finished: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Workflow {
    /// Whether the workflow has reached a terminal state (succeeded, failed,
    /// or aborted — the vocabulary is the platform's).
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Last-known status text as reported by the platform.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Id of the environment that owns this workflow.
    pub fn owner(&self) -> &str {
        &self.environment
    }

    /// Fetch the workflow's current state and update this handle in place.
    ///
    /// One round trip per call. Transport and permission errors propagate
    /// unchanged; the handle keeps its previous state in that case.
    pub async fn refresh<S: Session>(&mut self, session: &S) -> Result<()> {
        let update = session.fetch_workflow(self).await?;
        self.status = update.status;
        self.finished = update.finished;
        Ok(())
    }
}
