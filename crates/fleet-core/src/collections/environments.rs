//! Ordered, cached collection of one site's environments.

use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::models::environment::DEFAULT_ENVIRONMENTS;
use crate::models::{Environment, Site, Workflow};
use crate::session::Session;

/// A site's environments with canonical ordering and composable filters.
///
/// The collection is populated from the platform at most once, on first
/// read. Filters return new collections backed by the already-cached set;
/// they never re-fetch and never mutate the collection they filter.
#[derive(Debug, Clone)]
pub struct Environments {
    site: Site,
    models: Option<Vec<Environment>>,
}

impl Environments {
    pub fn new(site: Site) -> Self {
        Self { site, models: None }
    }

    fn from_cached(site: Site, models: Vec<Environment>) -> Self {
        Self {
            site,
            models: Some(models),
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// All environments in canonical order: `dev`, `test`, `live` (those
    /// present), then multidev environments by ascending id. Fetches from
    /// the platform on first call only.
    pub async fn all<S: Session>(&mut self, session: &S) -> Result<&[Environment]> {
        if self.models.is_none() {
            let raw = session.environments(&self.site).await?;
            self.models = Some(canonical_order(raw));
        }
        Ok(self.models.as_deref().unwrap_or_default())
    }

    /// Look up one environment by id.
    pub async fn get<S: Session>(&mut self, session: &S, id: &str) -> Result<Environment> {
        let site_name = self.site.name.clone();
        self.all(session)
            .await?
            .iter()
            .find(|env| env.id == id)
            .cloned()
            .ok_or_else(|| Error::UnknownEnvironment {
                site: site_name,
                environment: id.to_string(),
            })
    }

    async fn filter<S, F>(&mut self, session: &S, keep: F) -> Result<Environments>
    where
        S: Session,
        F: Fn(&Environment) -> bool,
    {
        let models = self.all(session).await?;
        let filtered = models.iter().filter(|env| keep(env)).cloned().collect();
        Ok(Environments::from_cached(self.site.clone(), filtered))
    }

    /// Only `dev` and multidev environments.
    pub async fn filter_for_development<S: Session>(&mut self, session: &S) -> Result<Environments> {
        self.filter(session, Environment::is_development).await
    }

    /// Only multidev environments.
    pub async fn filter_for_multidev<S: Session>(&mut self, session: &S) -> Result<Environments> {
        self.filter(session, Environment::is_multidev).await
    }

    /// Development environments that have pending upstream updates.
    pub async fn filter_for_upstream_updates<S: Session>(
        &mut self,
        session: &S,
    ) -> Result<Environments> {
        let mut development = self.filter_for_development(session).await?;
        development
            .filter(session, Environment::has_upstream_updates)
            .await
    }

    /// Submit the workflow that creates a new multidev environment, cloning
    /// database and files from `source`. Returns the handle immediately; id
    /// collisions are rejected by the platform, not pre-validated here.
    pub async fn create<S: Session>(
        &self,
        session: &S,
        new_id: &str,
        source: &Environment,
    ) -> Result<Workflow> {
        let params = json!({
            "environment_id": new_id,
            "deploy": {
                "clone_database": { "from_environment": source.id },
                "clone_files": { "from_environment": source.id },
                "annotation": format!("Create the \"{new_id}\" environment."),
            },
        });
        session
            .submit_workflow(
                &self.site.id,
                new_id,
                "create_cloud_development_environment",
                params,
            )
            .await
    }

    /// Ordered map of environment id to serialized environment. For frozen
    /// sites `test` and `live` are omitted here while remaining visible to
    /// `all()` and the filters.
    pub async fn serialize<S: Session>(&mut self, session: &S) -> Result<Map<String, Value>> {
        let frozen = self.site.is_frozen();
        let mut serialized = Map::new();
        for env in self.all(session).await? {
            if frozen && (env.id == "test" || env.id == "live") {
                continue;
            }
            serialized.insert(env.id.clone(), env.serialize());
        }
        Ok(serialized)
    }
}

/// `dev`, `test`, `live` first (those present), then multidev environments
/// in ascending lexicographic order of id.
fn canonical_order(mut raw: Vec<Environment>) -> Vec<Environment> {
    let mut ordered = Vec::with_capacity(raw.len());
    for id in DEFAULT_ENVIRONMENTS {
        if let Some(pos) = raw.iter().position(|env| env.id == id) {
            ordered.push(raw.swap_remove(pos));
        }
    }
    raw.sort_by(|a, b| a.id.cmp(&b.id));
    ordered.append(&mut raw);
    ordered
}
