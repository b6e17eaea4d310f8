//! Scripted in-memory [`Session`] for integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use fleet_core::error::{Error, Result};
use fleet_core::models::{Environment, Site, SiteRef, UpstreamStatus, Workflow, WorkflowUpdate};
use fleet_core::session::Session;

/// Operation submitted through [`MockSession::submit_workflow`].
#[derive(Debug, Clone)]
pub struct Submitted {
    pub site_id: String,
    pub environment_id: String,
    pub operation: String,
    pub params: Value,
}

/// In-memory session with canned sites/environments and scripted workflow
/// status sequences. Every fetch is counted so tests can assert round-trip
/// budgets.
#[derive(Default)]
pub struct MockSession {
    sites: Vec<Site>,
    environments: HashMap<String, Vec<Environment>>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Remaining scripted updates per workflow id, consumed front-first.
    scripts: HashMap<String, Vec<WorkflowUpdate>>,
    fetch_counts: HashMap<String, usize>,
    env_fetch_counts: HashMap<String, usize>,
    fail_once: HashMap<String, bool>,
    submitted: Vec<Submitted>,
    next_workflow: u32,
    /// Environments whose submitted workflows should end in a failed state.
    failing_environments: Vec<String>,
}

pub fn site(id: &str, name: &str) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        frozen: None,
    }
}

pub fn frozen_site(id: &str, name: &str) -> Site {
    Site {
        id: id.to_string(),
        name: name.to_string(),
        frozen: Some(true),
    }
}

pub fn environment(site: &Site, id: &str, behind: u64) -> Environment {
    Environment {
        id: id.to_string(),
        site: SiteRef {
            id: site.id.clone(),
            name: site.name.clone(),
        },
        upstream: Some(UpstreamStatus { behind }),
    }
}

pub fn update(status: &str, finished: bool) -> WorkflowUpdate {
    WorkflowUpdate {
        status: status.to_string(),
        finished,
    }
}

pub fn running_workflow(id: &str, site_id: &str, owner: &str) -> Workflow {
    Workflow {
        id: id.to_string(),
        site_id: site_id.to_string(),
        environment: owner.to_string(),
        status: "running".to_string(),
        finished: false,
        created_at: None,
    }
}

pub fn finished_workflow(id: &str, site_id: &str, owner: &str, status: &str) -> Workflow {
    Workflow {
        id: id.to_string(),
        site_id: site_id.to_string(),
        environment: owner.to_string(),
        status: status.to_string(),
        finished: true,
        created_at: None,
    }
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_site(&mut self, site: Site) {
        self.environments.entry(site.id.clone()).or_default();
        self.sites.push(site);
    }

    pub fn add_environment(&mut self, environment: Environment) {
        self.environments
            .entry(environment.site.id.clone())
            .or_default()
            .push(environment);
    }

    /// Script the status sequence returned by successive fetches of one
    /// workflow. Running out of script entries fails the test loudly.
    pub fn script_workflow(&self, workflow_id: &str, updates: Vec<WorkflowUpdate>) {
        self.inner
            .lock()
            .unwrap()
            .scripts
            .insert(workflow_id.to_string(), updates);
    }

    /// Make the next fetch of this workflow fail with a permission error.
    pub fn fail_next_fetch(&self, workflow_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_once
            .insert(workflow_id.to_string(), true);
    }

    /// Submitted workflows against this environment finish in a failed state.
    pub fn fail_submissions_for(&self, environment_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .failing_environments
            .push(environment_id.to_string());
    }

    pub fn fetch_count(&self, workflow_id: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .fetch_counts
            .get(workflow_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn environment_fetch_count(&self, site_id: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .env_fetch_counts
            .get(site_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn submissions(&self) -> Vec<Submitted> {
        self.inner.lock().unwrap().submitted.clone()
    }
}

impl Session for MockSession {
    async fn sites(&self) -> Result<Vec<Site>> {
        Ok(self.sites.clone())
    }

    async fn site(&self, name: &str) -> Result<Site> {
        self.sites
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| Error::UnknownSite {
                site: name.to_string(),
            })
    }

    async fn environments(&self, site: &Site) -> Result<Vec<Environment>> {
        let mut inner = self.inner.lock().unwrap();
        *inner.env_fetch_counts.entry(site.id.clone()).or_default() += 1;
        Ok(self
            .environments
            .get(&site.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_workflow(
        &self,
        site_id: &str,
        environment_id: &str,
        operation: &str,
        params: Value,
    ) -> Result<Workflow> {
        let mut inner = self.inner.lock().unwrap();
        inner.submitted.push(Submitted {
            site_id: site_id.to_string(),
            environment_id: environment_id.to_string(),
            operation: operation.to_string(),
            params,
        });
        inner.next_workflow += 1;
        let id = format!("wf-{}", inner.next_workflow);
        let failing = inner
            .failing_environments
            .iter()
            .any(|e| e == environment_id);
        let terminal = if failing { "failed" } else { "succeeded" };
        // Submitted workflows finish on their first fetch unless a test
        // scripted something longer-running for this id.
        inner
            .scripts
            .entry(id.clone())
            .or_insert_with(|| vec![update(terminal, true)]);
        Ok(running_workflow(&id, site_id, environment_id))
    }

    async fn fetch_workflow(&self, workflow: &Workflow) -> Result<WorkflowUpdate> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_once.remove(&workflow.id).unwrap_or(false) {
            return Err(Error::Api {
                status: 403,
                message: format!("permission denied for workflow {}", workflow.id),
            });
        }
        *inner.fetch_counts.entry(workflow.id.clone()).or_default() += 1;
        let script = inner
            .scripts
            .get_mut(&workflow.id)
            .unwrap_or_else(|| panic!("no script for workflow {}", workflow.id));
        assert!(
            !script.is_empty(),
            "workflow {} fetched more times than scripted",
            workflow.id
        );
        Ok(script.remove(0))
    }
}
