//! The built-in tool catalog.
//!
//! One entry per installable tool, each with its upstream location,
//! asset naming convention, and packaging format. Upstream projects
//! publish under incompatible naming schemes, so every entry carries
//! its own template.

use relkit_core::{ArtifactKind, AssetName, HookAction, PostInstall, ToolSpec, VersionGate};

/// All tools relkit knows how to install, in processing order.
#[must_use]
pub fn builtin() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "suave-geth",
            "flashbots",
            AssetName::template("suave-geth_{version}_linux_amd64.zip"),
            ArtifactKind::Zip,
        ),
        ToolSpec::new(
            "builder-playground",
            "flashbots",
            AssetName::template("builder-playground_{version}_linux_amd64.zip"),
            ArtifactKind::Zip,
        )
        // Releases after v0.1.0 drive local devnets through Docker
        // Compose and expect the plugin to be present on the runner.
        .with_post_install(PostInstall::when(
            VersionGate::after("v0.1.0"),
            HookAction::command(
                "sudo",
                ["apt-get", "install", "-y", "docker-compose-plugin"],
            ),
        )),
        ToolSpec::new(
            "reth",
            "paradigmxyz",
            AssetName::template("reth-{version}-x86_64-unknown-linux-gnu.tar.gz"),
            ArtifactKind::TarGz,
        ),
        ToolSpec::new(
            "op-reth",
            "paradigmxyz",
            AssetName::template("op-reth-{version}-x86_64-unknown-linux-gnu.tar.gz"),
            ArtifactKind::TarGz,
        ),
    ]
}
