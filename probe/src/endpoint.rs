//! Status endpoint resolution.

use thiserror::Error;
use url::Url;

/// Well-known path of the status endpoint, relative to the site origin.
pub const DEFAULT_STATUS_PATH: &str = "/api/demo";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid origin {origin:?}: {source}")]
    Origin {
        origin: String,
        source: url::ParseError,
    },
    #[error("origin {0:?} must use http or https")]
    Scheme(String),
    #[error("invalid status path {path:?}: {source}")]
    Path {
        path: String,
        source: url::ParseError,
    },
}

/// Join `path` onto `origin`, e.g. `http://localhost:8080` + `/api/demo`.
///
/// `path` replaces any path already present on the origin.
pub fn status_endpoint(origin: &str, path: &str) -> Result<Url, EndpointError> {
    let base = Url::parse(origin.trim()).map_err(|source| EndpointError::Origin {
        origin: origin.to_owned(),
        source,
    })?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(EndpointError::Scheme(origin.to_owned()));
    }
    base.join(path).map_err(|source| EndpointError::Path {
        path: path.to_owned(),
        source,
    })
}
