//! Create a new multidev environment by cloning an existing one.

use std::time::Duration;

use crate::collections::Environments;
use crate::queue::WorkflowQueue;
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct MultidevCreateOptions {
    /// Site to create the environment on.
    pub site: String,
    /// Id of the environment to create.
    pub new_id: String,
    /// Environment to clone database and files from.
    pub from_env: String,
}

#[derive(Debug, Clone)]
pub struct MultidevCreateReport {
    pub environment: String,
    /// Final workflow status as reported by the platform. A failed terminal
    /// state (e.g. an id collision rejected remotely) lands here, not in an
    /// error.
    pub status: String,
}

#[derive(Debug)]
pub struct MultidevCreateCommand<'a, S: Session> {
    session: &'a S,
    poll_interval: Duration,
}

impl<'a, S: Session> MultidevCreateCommand<'a, S> {
    pub fn new(session: &'a S, poll_interval: Duration) -> Self {
        Self {
            session,
            poll_interval,
        }
    }

    pub async fn execute(
        &self,
        options: &MultidevCreateOptions,
    ) -> anyhow::Result<MultidevCreateReport> {
        let site = self.session.site(&options.site).await?;
        let mut environments = Environments::new(site);
        let source = environments.get(self.session, &options.from_env).await?;

        tracing::info!(
            environment = %options.new_id,
            from = %source.id,
            "creating multidev environment"
        );
        let workflow = environments
            .create(self.session, &options.new_id, &source)
            .await?;

        let mut queue = WorkflowQueue::new();
        queue.push(workflow);
        while queue.in_progress(self.session).await? {
            tokio::time::sleep(self.poll_interval).await;
        }

        let status = queue
            .report()
            .get(options.new_id.as_str())
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Ok(MultidevCreateReport {
            environment: options.new_id.clone(),
            status,
        })
    }
}
