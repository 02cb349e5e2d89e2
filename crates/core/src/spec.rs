//! Static tool configuration.
//!
//! A [`ToolSpec`] describes one installable tool: where its releases
//! live, how its assets are named, how they are packaged, and any
//! follow-up action to run after installation. Specs are read-only
//! configuration; they never mutate during a run.

use serde::{Deserialize, Serialize};

use crate::version::VersionGate;

/// Packaging format of a release asset.
///
/// Determines how the installer processes the downloaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A zip archive; extracted with a zip decoder.
    Zip,
    /// A gzip-compressed tarball; extracted with a tar decoder.
    TarGz,
    /// A raw executable; the downloaded bytes are the binary itself.
    Binary,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zip => write!(f, "zip"),
            Self::TarGz => write!(f, "tar.gz"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

/// Naming strategy for a tool's release assets.
///
/// Upstream projects use incompatible naming schemes, so each spec
/// carries its own strategy. Rendering is pure string substitution
/// and performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetName {
    /// Filename template with version substitution.
    ///
    /// Supported placeholders:
    /// - `{version}` - the resolved tag verbatim (e.g. `v1.2.0`)
    /// - `{bare_version}` - the tag with one leading `v` stripped
    Template(String),
}

impl AssetName {
    /// Build a template naming strategy.
    #[must_use]
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// Render the asset filename for a resolved version tag.
    #[must_use]
    pub fn render(&self, version: &str) -> String {
        match self {
            Self::Template(template) => template
                .replace("{version}", version)
                .replace("{bare_version}", version.strip_prefix('v').unwrap_or(version)),
        }
    }
}

/// Opaque side-effecting action run by a post-install hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookAction {
    /// Run a program with arguments; non-zero exit is a failure.
    Command {
        /// The program to invoke.
        program: String,
        /// Arguments passed to the program.
        args: Vec<String>,
    },
}

impl HookAction {
    /// Build a command action.
    #[must_use]
    pub fn command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// A post-install action with an optional version gate.
///
/// When `gate` is absent the action runs after every successful
/// install; otherwise it runs only when the resolved version satisfies
/// the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInstall {
    /// Predicate over the resolved version; `None` means always run.
    pub gate: Option<VersionGate>,
    /// The action to run.
    pub action: HookAction,
}

impl PostInstall {
    /// An unconditional post-install action.
    #[must_use]
    pub fn always(action: HookAction) -> Self {
        Self { gate: None, action }
    }

    /// A post-install action gated on the resolved version.
    #[must_use]
    pub fn when(gate: VersionGate, action: HookAction) -> Self {
        Self {
            gate: Some(gate),
            action,
        }
    }
}

/// Static configuration for one installable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique identifier, used for input lookup, logging, and as the
    /// published binary name.
    pub name: String,
    /// Upstream GitHub organization.
    pub org: String,
    /// Upstream repository; defaults to `name`.
    pub repo: String,
    /// Asset naming strategy.
    pub asset: AssetName,
    /// Packaging format of the release asset.
    pub kind: ArtifactKind,
    /// Optional post-install action.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_install: Option<PostInstall>,
}

impl ToolSpec {
    /// Create a spec whose repository name matches the tool name.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        org: impl Into<String>,
        asset: AssetName,
        kind: ArtifactKind,
    ) -> Self {
        let name = name.into();
        Self {
            repo: name.clone(),
            name,
            org: org.into(),
            asset,
            kind,
            post_install: None,
        }
    }

    /// Override the upstream repository name.
    #[must_use]
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    /// Attach a post-install action.
    #[must_use]
    pub fn with_post_install(mut self, post_install: PostInstall) -> Self {
        self.post_install = Some(post_install);
        self
    }
}

/// What the invoking job asked for, per tool.
///
/// Parsed from the raw per-tool input string; the raw sentinel values
/// are folded into a tagged type so typos like `"Latest"` cannot be
/// silently treated as tags elsewhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    /// Empty input: do not install this tool.
    Skip,
    /// Resolve the most recently published release.
    Latest,
    /// Use an explicit tag verbatim.
    Pinned(String),
}

impl VersionRequest {
    /// Parse a raw input value.
    ///
    /// `""` (after trimming) means skip, the literal `"latest"` means
    /// dynamic resolution, anything else is treated as an explicit tag
    /// with no existence check.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Skip,
            "latest" => Self::Latest,
            tag => Self::Pinned(tag.to_string()),
        }
    }

    /// Whether this request skips installation entirely.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_name_render_verbatim_version() {
        let asset = AssetName::template("suave-geth_{version}_linux_amd64.zip");
        assert_eq!(
            asset.render("v0.2.4"),
            "suave-geth_v0.2.4_linux_amd64.zip"
        );
    }

    #[test]
    fn test_asset_name_render_bare_version() {
        let asset = AssetName::template("reth-{bare_version}-x86_64-unknown-linux-gnu.tar.gz");
        assert_eq!(
            asset.render("v1.0.0"),
            "reth-1.0.0-x86_64-unknown-linux-gnu.tar.gz"
        );
        // No leading v to strip
        assert_eq!(
            asset.render("1.0.0"),
            "reth-1.0.0-x86_64-unknown-linux-gnu.tar.gz"
        );
    }

    #[test]
    fn test_asset_name_render_is_idempotent() {
        let asset = AssetName::template("x_{version}_linux_amd64.zip");
        assert_eq!(asset.render("v1.0.0"), asset.render("v1.0.0"));
    }

    #[test]
    fn test_version_request_parse() {
        assert_eq!(VersionRequest::parse(""), VersionRequest::Skip);
        assert_eq!(VersionRequest::parse("   "), VersionRequest::Skip);
        assert_eq!(VersionRequest::parse("latest"), VersionRequest::Latest);
        assert_eq!(
            VersionRequest::parse("v1.2.3"),
            VersionRequest::Pinned("v1.2.3".to_string())
        );
    }

    #[test]
    fn test_version_request_sentinel_is_case_sensitive() {
        // "Latest" is not the sentinel; it is treated as a tag and will
        // fail at download time like any other invalid tag.
        assert_eq!(
            VersionRequest::parse("Latest"),
            VersionRequest::Pinned("Latest".to_string())
        );
    }

    #[test]
    fn test_tool_spec_repo_defaults_to_name() {
        let spec = ToolSpec::new(
            "reth",
            "paradigmxyz",
            AssetName::template("reth-{version}.tar.gz"),
            ArtifactKind::TarGz,
        );
        assert_eq!(spec.repo, "reth");

        let spec = spec.with_repo("reth-releases");
        assert_eq!(spec.repo, "reth-releases");
        assert_eq!(spec.name, "reth");
    }

    #[test]
    fn test_artifact_kind_display() {
        assert_eq!(ArtifactKind::Zip.to_string(), "zip");
        assert_eq!(ArtifactKind::TarGz.to_string(), "tar.gz");
        assert_eq!(ArtifactKind::Binary.to_string(), "binary");
    }

    #[test]
    fn test_tool_spec_serialization_round_trip() {
        let spec = ToolSpec::new(
            "suave-geth",
            "flashbots",
            AssetName::template("suave-geth_{version}_linux_amd64.zip"),
            ArtifactKind::Zip,
        );
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"name\":\"suave-geth\""));
        // post_install is None and should not be serialized
        assert!(!json.contains("post_install"));

        let back: ToolSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
