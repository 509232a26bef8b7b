// ABOUTME: Deployment state types for the type state pattern.
// ABOUTME: Each state carries the data produced by the step that reached it.

use crate::archive::Archive;
use crate::cloud::{FunctionResource, Operation};

use super::strategy::UploadStrategy;

/// Initial state: configuration validated, client connected.
/// Available actions: `locate()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Located: the existing function resource was fetched.
/// Available actions: `package()`
#[derive(Debug, Clone)]
pub struct Located {
    pub(crate) function: FunctionResource,
}

/// Packaged: the source directory is zipped in memory.
/// Available actions: `upload()`
#[derive(Debug, Clone)]
pub struct Packaged {
    pub(crate) function: FunctionResource,
    pub(crate) archive: Archive,
}

/// Uploaded: the archive reached the platform.
/// Available actions: `patch()`
#[derive(Debug, Clone)]
pub struct Uploaded {
    pub(crate) function: FunctionResource,
    pub(crate) archive: Archive,
    pub(crate) strategy: UploadStrategy,
}

/// Patched: the function now points at the new source.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Patched {
    pub(crate) function: FunctionResource,
    pub(crate) archive: Archive,
    pub(crate) strategy: UploadStrategy,
    pub(crate) operation: Operation,
}
