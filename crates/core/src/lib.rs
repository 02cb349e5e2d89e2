//! Core types for relkit.
//!
//! This crate defines the vocabulary shared by the resolver, installer,
//! and CLI crates:
//!
//! - [`ToolSpec`] - static configuration for one installable tool
//! - [`VersionRequest`] - what the invoking job asked for
//! - [`ArtifactKind`] / [`AssetName`] - how a release asset is packaged
//!   and named
//! - [`PostInstall`] / [`VersionGate`] - version-gated follow-up actions
//! - [`Error`] / [`Result`] - the error taxonomy for a tool's pipeline
//! - [`actions`] - the GitHub Actions environment interface (inputs,
//!   `GITHUB_PATH` additions)

pub mod actions;
mod error;
mod spec;
mod version;

pub use error::{Error, Result};
pub use spec::{
    ArtifactKind, AssetName, HookAction, PostInstall, ToolSpec, VersionRequest,
};
pub use version::{VersionGate, parse_lenient};
