// ABOUTME: Deployment configuration read from environment-style key/value lookup.
// ABOUTME: Validates required keys in a fixed order and stops at the first missing one.

mod debug_mode;

pub use debug_mode::parse_debug_mode;

use std::path::PathBuf;
use thiserror::Error;

pub const PROJECT_KEY: &str = "gcp_project";
pub const REGION_KEY: &str = "gcp_region";
pub const FUNCTION_NAME_KEY: &str = "cloud_function_name";
pub const SOURCE_DIRECTORY_KEY: &str = "cloud_function_directory";
pub const CREDENTIALS_KEY: &str = "credentials";
pub const DEBUG_MODE_KEY: &str = "debug_mode";

/// Required keys, in the order they are validated.
pub const REQUIRED_KEYS: [&str; 5] = [
    PROJECT_KEY,
    REGION_KEY,
    FUNCTION_NAME_KEY,
    SOURCE_DIRECTORY_KEY,
    CREDENTIALS_KEY,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required config: {0}")]
    Missing(&'static str),

    #[error("invalid debug_mode value: {0:?}")]
    InvalidDebugMode(String),
}

/// Settings for a single deployment run. Immutable once loaded.
#[derive(Clone)]
pub struct DeployConfig {
    pub project_id: String,
    pub region: String,
    pub function_name: String,
    pub source_directory: PathBuf,
    pub credentials_json: String,
    pub debug_mode: bool,
}

impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("project_id", &self.project_id)
            .field("region", &self.region)
            .field("function_name", &self.function_name)
            .field("source_directory", &self.source_directory)
            .field("credentials_json", &"<redacted>")
            .field("debug_mode", &self.debug_mode)
            .finish()
    }
}

impl DeployConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    ///
    /// `debug_mode` is parsed first, then the required keys are checked in
    /// [`REQUIRED_KEYS`] order. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug_mode = parse_debug_mode(lookup(DEBUG_MODE_KEY).as_deref())?;

        let project_id = required(&lookup, PROJECT_KEY)?;
        let region = required(&lookup, REGION_KEY)?;
        let function_name = required(&lookup, FUNCTION_NAME_KEY)?;
        let source_directory = PathBuf::from(required(&lookup, SOURCE_DIRECTORY_KEY)?);
        let credentials_json = required(&lookup, CREDENTIALS_KEY)?;

        tracing::debug!("All required environment variables are present");

        Ok(DeployConfig {
            project_id,
            region,
            function_name,
            source_directory,
            credentials_json,
            debug_mode,
        })
    }

    /// `projects/{project}/locations/{region}`
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.region)
    }

    /// `projects/{project}/locations/{region}/functions/{name}`
    pub fn function_path(&self) -> String {
        format!("{}/functions/{}", self.parent(), self.function_name)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => {
            tracing::error!("Missing required environment variable: {key}");
            Err(ConfigError::Missing(key))
        }
    }
}

/// Read only the source directory key, for commands that never talk to the platform.
pub fn source_directory_from_lookup<F>(lookup: F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    required(&lookup, SOURCE_DIRECTORY_KEY).map(PathBuf::from)
}
