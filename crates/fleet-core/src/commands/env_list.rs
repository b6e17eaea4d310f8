//! List a site's environments.

use serde_json::{Map, Value};

use crate::collections::Environments;
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct EnvListOptions {
    /// Site name to list environments for.
    pub site: String,
}

#[derive(Debug)]
pub struct EnvListCommand<'a, S: Session> {
    session: &'a S,
}

impl<'a, S: Session> EnvListCommand<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    /// Ordered id → environment map. Frozen sites omit `test` and `live`.
    pub async fn execute(&self, options: &EnvListOptions) -> anyhow::Result<Map<String, Value>> {
        let site = self.session.site(&options.site).await?;
        let mut environments = Environments::new(site);
        Ok(environments.serialize(self.session).await?)
    }
}
