//! Resolution of loosely-specified targets into concrete environment sets.

use crate::collections::Environments;
use crate::error::{Error, Result};
use crate::models::{Environment, Site};
use crate::session::Session;

/// Split a `site` or `site.env` selector into its parts.
pub fn parse_site_env(selector: &str) -> Result<(String, Option<String>)> {
    let invalid = || Error::InvalidSelector {
        selector: selector.to_string(),
    };
    let (site, env) = match selector.split_once('.') {
        Some((site, env)) => (site, Some(env)),
        None => (selector, None),
    };
    if site.is_empty() || env.is_some_and(str::is_empty) {
        return Err(invalid());
    }
    Ok((site.to_string(), env.map(str::to_string)))
}

/// Turns a (site, environment-or-none, apply-to-all) tuple into the ordered
/// set of environments an operation will run against.
///
/// Collaborators are injected; the resolver owns no state of its own.
#[derive(Debug)]
pub struct TargetResolver<'a, S: Session> {
    session: &'a S,
}

impl<'a, S: Session> TargetResolver<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    /// Resolve per the priority rules:
    ///
    /// 1. A named environment must be development-class; the target set is
    ///    exactly that environment.
    /// 2. A named site targets its development environments with pending
    ///    upstream updates.
    /// 3. No site and `all` fans out over every accessible site, in the
    ///    platform's enumeration order.
    /// 4. Otherwise the target set is empty, which is not an error.
    pub async fn resolve(
        &self,
        site: Option<&Site>,
        environment: Option<Environment>,
        all: bool,
    ) -> Result<Vec<Environment>> {
        if let Some(environment) = environment {
            if !environment.is_development() {
                return Err(Error::ineligible(&environment.id));
            }
            return Ok(vec![environment]);
        }

        if let Some(site) = site {
            return self.eligible_environments(site).await;
        }

        if !all {
            return Ok(Vec::new());
        }

        tracing::info!("retrieving all sites; this may take a long time");
        let sites = self.session.sites().await?;
        tracing::info!(count = sites.len(), "sites found");
        let mut targets = Vec::new();
        for site in &sites {
            targets.extend(self.eligible_environments(site).await?);
        }
        Ok(targets)
    }

    /// Resolve a raw `site[.env]` selector string from the CLI.
    pub async fn resolve_selector(
        &self,
        selector: Option<&str>,
        all: bool,
    ) -> Result<Vec<Environment>> {
        let Some(selector) = selector else {
            return self.resolve(None, None, all).await;
        };
        let (site_name, env_id) = parse_site_env(selector)?;
        let site = self.session.site(&site_name).await?;
        let environment = match env_id {
            Some(id) => Some(
                Environments::new(site.clone())
                    .get(self.session, &id)
                    .await?,
            ),
            None => None,
        };
        self.resolve(Some(&site), environment, all).await
    }

    /// One site's development environments with pending upstream updates,
    /// in canonical collection order.
    async fn eligible_environments(&self, site: &Site) -> Result<Vec<Environment>> {
        tracing::info!(site = %site.name, "retrieving development environments");
        let mut eligible = Environments::new(site.clone())
            .filter_for_upstream_updates(self.session)
            .await?;
        Ok(eligible.all(self.session).await?.to_vec())
    }
}
