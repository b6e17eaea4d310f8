//! Polling queue over a batch of remote workflows.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::Workflow;
use crate::session::Session;

/// Ordered batch of workflow handles driven to completion by polling.
///
/// Handles are refreshed in push order. A handle observed finished is never
/// refreshed again. The queue inserts no delay of its own between polling
/// passes; callers sleep between `in_progress` calls.
#[derive(Debug, Default)]
pub struct WorkflowQueue {
    workflows: Vec<Workflow>,
}

impl WorkflowQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle. Duplicate owners are allowed; the status report then
    /// shows the later handle's status for that owner.
    pub fn push(&mut self, workflow: Workflow) {
        self.workflows.push(workflow);
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// One refresh round trip for every handle still unfinished, in queue
    /// order. Transport errors propagate immediately; statuses recorded so
    /// far stay in the queue.
    pub async fn poll<S: Session>(&mut self, session: &S) -> Result<()> {
        for index in 0..self.workflows.len() {
            if !self.workflows[index].is_finished() {
                self.workflows[index].refresh(session).await?;
            }
        }
        Ok(())
    }

    /// One polling pass, then whether any handle remains unfinished. Loop on
    /// this (with a delay between iterations) until it returns false. Once
    /// everything is finished this stays false and performs no refreshes.
    pub async fn in_progress<S: Session>(&mut self, session: &S) -> Result<bool> {
        self.poll(session).await?;
        Ok(self.workflows.iter().any(|wf| !wf.is_finished()))
    }

    /// Ordered map of owning environment id to last-known status. When two
    /// handles share an owner the later one's status wins, at the earlier
    /// one's position.
    pub fn report(&self) -> Map<String, Value> {
        let mut statuses = Map::new();
        for workflow in &self.workflows {
            statuses.insert(
                workflow.owner().to_string(),
                Value::String(workflow.status().to_string()),
            );
        }
        statuses
    }
}

impl fmt::Display for WorkflowQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (owner, status) in self.report() {
            writeln!(f, "{}: {}", owner, status.as_str().unwrap_or_default())?;
        }
        Ok(())
    }
}
