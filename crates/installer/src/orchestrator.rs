//! Installation orchestration.
//!
//! Drives the per-tool pipeline (resolve → locate → download → unpack
//! → post-install) and isolates failures at the tool boundary: an
//! error while processing one tool is recorded against that tool only
//! and never prevents the remaining tools from being attempted.

use std::collections::HashMap;
use std::path::PathBuf;

use relkit_core::{Error, Result, ToolSpec, VersionRequest};
use relkit_github::ReleaseClient;
use tracing::{info, warn};

use crate::{extract, hook};

/// A successfully installed tool.
#[derive(Debug)]
pub struct InstalledTool {
    /// Tool name.
    pub name: String,
    /// The concrete version tag that was installed.
    pub version: String,
    /// Absolute directory containing the runnable executable.
    pub dir: PathBuf,
}

/// A tool whose pipeline failed.
#[derive(Debug)]
pub struct FailedTool {
    /// Tool name.
    pub name: String,
    /// The error that terminated this tool's pipeline.
    pub error: Error,
}

/// Aggregate outcome of a run.
///
/// Every non-skipped tool appears in exactly one of the two lists.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Tools that reached the `Ready` state, in processing order.
    pub installed: Vec<InstalledTool>,
    /// Tools that failed, in processing order.
    pub failures: Vec<FailedTool>,
}

impl RunSummary {
    /// Whether the run as a whole should be reported as failed.
    ///
    /// Successes keep their path contributions regardless.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Release installation engine.
pub struct Installer {
    client: ReleaseClient,
    install_root: PathBuf,
}

impl Installer {
    /// Create an installer placing tools under `install_root`.
    #[must_use]
    pub fn new(client: ReleaseClient, install_root: PathBuf) -> Self {
        Self {
            client,
            install_root,
        }
    }

    /// Resolve a version request to a concrete tag.
    ///
    /// `Latest` queries the release index; a pinned tag is trusted and
    /// returned unchanged, so an invalid tag only surfaces later as a
    /// download failure.
    pub async fn resolve_version(
        &self,
        spec: &ToolSpec,
        request: &VersionRequest,
    ) -> Result<String> {
        match request {
            // Skip requests are filtered out before resolution starts.
            VersionRequest::Skip => Err(Error::environment(format!(
                "empty version request for '{}' cannot be resolved",
                spec.name
            ))),
            VersionRequest::Latest => self.client.latest_tag(&spec.org, &spec.repo).await,
            VersionRequest::Pinned(tag) => Ok(tag.clone()),
        }
    }

    /// Run one tool's full pipeline.
    ///
    /// Returns `Ok(None)` for a skip request, `Ok(Some(_))` once the
    /// tool is ready, and the first pipeline error otherwise.
    pub async fn install(
        &self,
        spec: &ToolSpec,
        request: &VersionRequest,
    ) -> Result<Option<InstalledTool>> {
        if request.is_skip() {
            return Ok(None);
        }

        let version = self.resolve_version(spec, request).await?;
        let asset = spec.asset.render(&version);
        let url = self
            .client
            .download_url(&spec.org, &spec.repo, &version, &asset);

        info!(tool = %spec.name, %version, %url, "Installing release");

        let data = self.client.download(&url).await?;
        let dest = self.install_root.join(&spec.name).join(&version);
        let dir = extract::unpack(&data, spec.kind, &spec.name, &dest)?;

        if let Some(post_install) = &spec.post_install {
            hook::maybe_run(&spec.name, post_install, &version).await?;
        }

        info!(tool = %spec.name, %version, dir = %dir.display(), "Installed release");
        Ok(Some(InstalledTool {
            name: spec.name.clone(),
            version,
            dir,
        }))
    }

    /// Process every configured tool, isolating failures.
    ///
    /// Tools run sequentially in `specs` order. Requests naming a tool
    /// with no configuration are recorded as failures without
    /// affecting configured tools.
    pub async fn run_all(
        &self,
        specs: &[ToolSpec],
        requests: &HashMap<String, VersionRequest>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        for spec in specs {
            let request = requests.get(&spec.name).unwrap_or(&VersionRequest::Skip);
            match self.install(spec, request).await {
                Ok(Some(installed)) => summary.installed.push(installed),
                Ok(None) => {}
                Err(error) => {
                    warn!(tool = %spec.name, %error, "Tool installation failed");
                    summary.failures.push(FailedTool {
                        name: spec.name.clone(),
                        error,
                    });
                }
            }
        }

        // Requests for tools we know nothing about are their own
        // failures; sorted so the report order is deterministic.
        let mut unknown: Vec<String> = requests
            .iter()
            .filter(|(name, request)| {
                !request.is_skip() && !specs.iter().any(|spec| &&spec.name == name)
            })
            .map(|(name, _)| name.clone())
            .collect();
        unknown.sort();
        for name in unknown {
            warn!(tool = %name, "No configuration for requested tool");
            summary.failures.push(FailedTool {
                error: Error::configuration_missing(name.as_str()),
                name,
            });
        }

        summary
    }
}
