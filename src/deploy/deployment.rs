// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: State types carry their own data for compile-time guarantees.

use crate::archive::Archive;
use crate::cloud::{FunctionResource, Operation};
use crate::config::DeployConfig;

use super::state::{Initialized, Located, Packaged, Patched, Uploaded};
use super::strategy::UploadStrategy;

/// A deployment in progress, parameterized by its current state.
///
/// The function resource only exists from `Located` onwards and the archive
/// only from `Packaged`, so neither can be used before it has been produced.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) config: DeployConfig,
    pub(crate) state: S,
}

/// Summary of a finished deployment.
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub function: FunctionResource,
    pub strategy: UploadStrategy,
    pub archive: Archive,
    pub operation: Operation,
}

impl DeployReport {
    /// Name of the long-running patch operation, if the platform returned one.
    pub fn operation_name(&self) -> Option<&str> {
        self.operation.name.as_deref()
    }
}

impl Deployment<Initialized> {
    pub fn new(config: DeployConfig) -> Self {
        Deployment {
            config,
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Fully-qualified function name.
    pub fn function_path(&self) -> String {
        self.config.function_path()
    }
}

impl Deployment<Located> {
    pub fn function(&self) -> &FunctionResource {
        &self.state.function
    }

    /// The strategy the upload step will use.
    pub fn strategy(&self) -> UploadStrategy {
        UploadStrategy::for_function(&self.state.function)
    }
}

impl Deployment<Packaged> {
    pub fn function(&self) -> &FunctionResource {
        &self.state.function
    }

    pub fn archive(&self) -> &Archive {
        &self.state.archive
    }
}

impl Deployment<Uploaded> {
    pub fn function(&self) -> &FunctionResource {
        &self.state.function
    }

    pub fn strategy(&self) -> &UploadStrategy {
        &self.state.strategy
    }
}

impl Deployment<Patched> {
    pub fn operation(&self) -> &Operation {
        &self.state.operation
    }

    /// Finish the deployment and return its summary.
    pub fn finish(self) -> DeployReport {
        DeployReport {
            function: self.state.function,
            strategy: self.state.strategy,
            archive: self.state.archive,
            operation: self.state.operation,
        }
    }
}
