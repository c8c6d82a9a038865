use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use vigil_probe::{DEFAULT_PROBE_TIMEOUT, DEFAULT_STATUS_PATH, EndpointError, status_endpoint};
use vigil_types::{CaseCatalog, CatalogError, case_library};

use crate::navigator::DEFAULT_SCROLL_DELAY;
use crate::rotator::DEFAULT_PHASE_INTERVAL;
use crate::status::DEFAULT_INITIAL_DELAY;

/// Environment variable that overrides `[status] origin`.
pub const ORIGIN_ENV: &str = "VIGIL_ORIGIN";

/// Origin probed when nothing is configured.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8080";

#[derive(Debug, Default, Deserialize)]
pub struct VigilConfig {
    pub status: Option<StatusConfig>,
    pub presentation: Option<PresentationConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusConfig {
    /// Site origin, e.g. `https://vigilum.example`. `${VAR}` references are expanded.
    pub origin: Option<String>,
    /// Status endpoint path relative to the origin. Default: `/api/demo`.
    pub path: Option<String>,
    pub timeout_ms: Option<u64>,
    /// Delay before the landing view issues its probe. Default: 1000.
    pub initial_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PresentationConfig {
    pub phase_interval_ms: Option<u64>,
    pub scroll_delay_ms: Option<u64>,
    /// JSON file replacing the built-in case library.
    pub case_library: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Expand `${VAR}` references. Unset variables expand to nothing; an unclosed
/// `${` is kept verbatim.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl VigilConfig {
    /// Load `~/.vigil/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vigil").join("config.toml"))
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("failed to read case library at {}: {source}", path.display())]
    CaseLibraryRead { path: PathBuf, source: io::Error },
    #[error("invalid case library at {}: {source}", path.display())]
    CaseLibrary {
        path: PathBuf,
        source: CatalogError,
    },
}

/// Concrete runtime values after defaults, env expansion and overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub origin: String,
    pub status_path: String,
    pub probe_timeout: Duration,
    pub initial_delay: Duration,
    pub phase_interval: Duration,
    pub scroll_delay: Duration,
    pub case_library: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            status_path: DEFAULT_STATUS_PATH.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            initial_delay: DEFAULT_INITIAL_DELAY,
            phase_interval: DEFAULT_PHASE_INTERVAL,
            scroll_delay: DEFAULT_SCROLL_DELAY,
            case_library: None,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let expanded = expand_env_vars(value);
    let trimmed = expanded.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl Settings {
    /// Resolve against the environment: `VIGIL_ORIGIN` wins over the file.
    #[must_use]
    pub fn resolve(config: Option<&VigilConfig>) -> Self {
        Self::resolve_with_origin_override(config, env::var(ORIGIN_ENV).ok())
    }

    #[must_use]
    pub fn resolve_with_origin_override(
        config: Option<&VigilConfig>,
        origin_override: Option<String>,
    ) -> Self {
        let mut settings = Self::default();
        let status = config.and_then(|c| c.status.as_ref());
        let presentation = config.and_then(|c| c.presentation.as_ref());

        if let Some(status) = status {
            if let Some(origin) = status.origin.as_deref().and_then(non_empty) {
                settings.origin = origin;
            }
            if let Some(path) = status.path.as_deref().and_then(non_empty) {
                settings.status_path = path;
            }
            if let Some(ms) = status.timeout_ms {
                settings.probe_timeout = Duration::from_millis(ms);
            }
            if let Some(ms) = status.initial_delay_ms {
                settings.initial_delay = Duration::from_millis(ms);
            }
        }

        if let Some(presentation) = presentation {
            if let Some(ms) = presentation.phase_interval_ms {
                settings.phase_interval = Duration::from_millis(ms);
            }
            if let Some(ms) = presentation.scroll_delay_ms {
                settings.scroll_delay = Duration::from_millis(ms);
            }
            settings.case_library = presentation
                .case_library
                .as_deref()
                .and_then(non_empty)
                .map(PathBuf::from);
        }

        if let Some(origin) = origin_override.as_deref().and_then(non_empty) {
            settings.origin = origin;
        }

        settings
    }

    pub fn status_endpoint(&self) -> Result<Url, SettingsError> {
        Ok(status_endpoint(&self.origin, &self.status_path)?)
    }

    /// The configured case library, or the built-in one.
    pub fn load_cases(&self) -> Result<CaseCatalog, SettingsError> {
        let Some(path) = self.case_library.as_ref() else {
            return Ok(case_library());
        };
        let json = fs::read_to_string(path).map_err(|source| SettingsError::CaseLibraryRead {
            path: path.clone(),
            source,
        })?;
        CaseCatalog::from_json(&json).map_err(|source| SettingsError::CaseLibrary {
            path: path.clone(),
            source,
        })
    }
}
