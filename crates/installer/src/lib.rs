//! Release installation engine for relkit.
//!
//! Turns a (tool name, version request) pair into an installed,
//! runnable binary:
//!
//! - [`Installer::resolve_version`] - `latest` sentinel resolution
//!   against the release index
//! - [`extract::unpack`] - format-specific unpacking (zip, tar.gz,
//!   raw executable)
//! - [`hook::maybe_run`] - version-gated post-install actions
//! - [`Installer::run_all`] - batch orchestration with per-tool
//!   failure isolation

pub mod extract;
pub mod hook;
mod orchestrator;

pub use orchestrator::{FailedTool, InstalledTool, Installer, RunSummary};
