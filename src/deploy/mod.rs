// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state markers and Deployment struct for compile-time safe deployments.

mod deployment;
mod error;
mod state;
mod strategy;
mod transitions;

pub use deployment::{DeployReport, Deployment};
pub use error::DeployError;
pub use state::{Initialized, Located, Packaged, Patched, Uploaded};
pub use strategy::UploadStrategy;
