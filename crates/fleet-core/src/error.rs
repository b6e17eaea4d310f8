//! Core error type shared across the library.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The named environment is not a development-class environment, so
    /// upstream updates cannot be applied to it.
    #[error("upstream updates cannot be applied to the {environment} environment")]
    IneligibleEnvironment { environment: String },

    #[error("could not find a site named {site}")]
    UnknownSite { site: String },

    #[error("site {site} has no environment named {environment}")]
    UnknownEnvironment { site: String, environment: String },

    #[error("could not parse {selector} as <site> or <site>.<env>")]
    InvalidSelector { selector: String },

    /// Transport-level failure. Never retried by the core; polling and
    /// target resolution abort and surface this to the caller.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn ineligible(environment: impl Into<String>) -> Self {
        Self::IneligibleEnvironment {
            environment: environment.into(),
        }
    }
}
