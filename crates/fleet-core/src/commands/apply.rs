//! Apply pending upstream updates across the resolved target set.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::queue::WorkflowQueue;
use crate::session::Session;
use crate::targeting::TargetResolver;

/// Options for the apply command.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// `site` or `site.env` selector; `None` with `all` targets the fleet.
    pub selector: Option<String>,
    /// Target all development environments of every accessible site.
    pub all: bool,
    /// Run the framework's database update step after applying.
    pub updatedb: bool,
    /// Resolve merge conflicts in favor of the upstream.
    pub accept_upstream: bool,
}

/// Outcome of one apply batch.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Environments the batch ran against.
    pub targets: usize,
    /// Final status per owning environment id, in submission order.
    pub statuses: Map<String, Value>,
}

impl ApplyReport {
    /// True when target resolution found nothing eligible. Not an error;
    /// the caller reports "nothing to do" and exits successfully.
    pub fn nothing_to_do(&self) -> bool {
        self.targets == 0
    }
}

/// Orchestrates one apply batch end to end: resolve targets, submit one
/// workflow per target, poll the batch to completion, report.
#[derive(Debug)]
pub struct ApplyCommand<'a, S: Session> {
    session: &'a S,
    poll_interval: Duration,
}

impl<'a, S: Session> ApplyCommand<'a, S> {
    pub fn new(session: &'a S, poll_interval: Duration) -> Self {
        Self {
            session,
            poll_interval,
        }
    }

    pub async fn execute(&self, options: &ApplyOptions) -> anyhow::Result<ApplyReport> {
        let resolver = TargetResolver::new(self.session);
        let targets = resolver
            .resolve_selector(options.selector.as_deref(), options.all)
            .await?;

        if targets.is_empty() {
            tracing::info!("none of the targeted environments have updates to apply");
            return Ok(ApplyReport {
                targets: 0,
                statuses: Map::new(),
            });
        }

        let mut queue = WorkflowQueue::new();
        for environment in &targets {
            tracing::info!(
                environment = %environment.id,
                site = %environment.site.name,
                "applying available updates"
            );
            let workflow = environment
                .apply_upstream_updates(self.session, options.updatedb, options.accept_upstream)
                .await?;
            queue.push(workflow);
        }

        // The queue itself never sleeps; the delay here keeps the poll loop
        // from spinning against the API.
        while queue.in_progress(self.session).await? {
            tokio::time::sleep(self.poll_interval).await;
        }

        Ok(ApplyReport {
            targets: targets.len(),
            statuses: queue.report(),
        })
    }
}
