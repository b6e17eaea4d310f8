//! reqwest-backed [`Session`] implementation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::config::FleetConfig;
use crate::error::{Error, Result};
use crate::models::{Environment, Site, SiteRef, UpstreamStatus, Workflow, WorkflowUpdate};
use crate::session::Session;

const USER_AGENT: &str = concat!("fleet/", env!("CARGO_PKG_VERSION"));

/// Bearer-token authenticated HTTP session against the platform API.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: reqwest::Client,
    base: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct SiteWire {
    id: String,
    name: String,
    #[serde(default)]
    frozen: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentWire {
    #[serde(default)]
    upstream: Option<UpstreamWire>,
}

#[derive(Debug, Deserialize)]
struct UpstreamWire {
    #[serde(default)]
    behind: u64,
}

#[derive(Debug, Deserialize)]
struct WorkflowWire {
    id: String,
    environment: String,
    status: String,
    finished: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl HttpSession {
    pub fn new(config: &FleetConfig) -> Result<Self> {
        let token = config
            .machine_token
            .clone()
            .ok_or_else(|| Error::Config("no machine token configured".to_string()))?;
        let base = Url::parse(&config.host)
            .map_err(|e| Error::Config(format!("invalid host {}: {e}", config.host)))?;
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint {path}: {e}")))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<T: serde::de::DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

impl Session for HttpSession {
    async fn sites(&self) -> Result<Vec<Site>> {
        let wires: Vec<SiteWire> = self.get("user/sites").await?;
        Ok(wires
            .into_iter()
            .map(|w| Site {
                id: w.id,
                name: w.name,
                frozen: w.frozen,
            })
            .collect())
    }

    async fn site(&self, name: &str) -> Result<Site> {
        let result: Result<SiteWire> = self.get(&format!("site-names/{name}")).await;
        match result {
            Ok(w) => Ok(Site {
                id: w.id,
                name: w.name,
                frozen: w.frozen,
            }),
            Err(Error::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(Error::UnknownSite {
                    site: name.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn environments(&self, site: &Site) -> Result<Vec<Environment>> {
        let wires: HashMap<String, EnvironmentWire> =
            self.get(&format!("sites/{}/environments", site.id)).await?;
        let site_ref = site.to_ref();
        Ok(wires
            .into_iter()
            .map(|(id, w)| Environment {
                id,
                site: site_ref.clone(),
                upstream: w.upstream.map(|u| UpstreamStatus { behind: u.behind }),
            })
            .collect())
    }

    async fn submit_workflow(
        &self,
        site_id: &str,
        environment_id: &str,
        operation: &str,
        params: Value,
    ) -> Result<Workflow> {
        let body = json!({ "type": operation, "params": params });
        let wire: WorkflowWire = self
            .post(
                &format!("sites/{site_id}/environments/{environment_id}/workflows"),
                &body,
            )
            .await?;
        Ok(Workflow {
            id: wire.id,
            site_id: site_id.to_string(),
            environment: wire.environment,
            status: wire.status,
            finished: wire.finished,
            created_at: wire.created_at,
        })
    }

    async fn fetch_workflow(&self, workflow: &Workflow) -> Result<WorkflowUpdate> {
        let wire: WorkflowWire = self
            .get(&format!(
                "sites/{}/workflows/{}",
                workflow.site_id, workflow.id
            ))
            .await?;
        Ok(WorkflowUpdate {
            status: wire.status,
            finished: wire.finished,
        })
    }
}
