// ABOUTME: Library root for gcf-deploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod archive;
pub mod cloud;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod deploy;
pub mod error;
pub mod output;
