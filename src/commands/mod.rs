// ABOUTME: Command module aggregator for the gcf-deploy CLI.
// ABOUTME: Re-exports the deploy and package command handlers.

mod deploy;
mod package;

pub use deploy::{check_directory, deploy};
pub use package::package;

use crate::config::ConfigError;
use crate::error::Error;

/// Map configuration failures onto the error taxonomy.
pub(crate) fn config_error(err: ConfigError) -> Error {
    match err {
        ConfigError::Missing(key) => Error::MissingConfig(key.to_string()),
        other => {
            tracing::error!("Unexpected error during deployment: {other}");
            Error::unexpected(other)
        }
    }
}
