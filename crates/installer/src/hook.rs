//! Post-install hook execution.

use relkit_core::{Error, HookAction, PostInstall, Result};
use tracing::{debug, info, warn};

/// Run a tool's post-install action if its version gate allows it.
///
/// An absent gate always runs. A resolved version that does not parse
/// as semver never satisfies a gate; that case is logged and the hook
/// is skipped rather than failed, since the binary itself installed
/// correctly. A hook that runs and fails is the tool's failure.
pub async fn maybe_run(tool: &str, post_install: &PostInstall, resolved: &str) -> Result<()> {
    if let Some(gate) = &post_install.gate {
        if relkit_core::parse_lenient(resolved).is_none() {
            warn!(%tool, version = %resolved, %gate, "Resolved version is not semver; skipping gated post-install action");
            return Ok(());
        }
        if !gate.allows(resolved) {
            debug!(%tool, version = %resolved, %gate, "Version gate not satisfied; skipping post-install action");
            return Ok(());
        }
    }

    run_action(tool, &post_install.action).await
}

async fn run_action(tool: &str, action: &HookAction) -> Result<()> {
    match action {
        HookAction::Command { program, args } => {
            info!(%tool, %program, ?args, "Running post-install action");

            let status = tokio::process::Command::new(program)
                .args(args)
                .status()
                .await
                .map_err(|e| Error::post_install_failed(tool, format!("failed to spawn {program}: {e}")))?;

            if !status.success() {
                return Err(Error::post_install_failed(
                    tool,
                    format!("{program} exited with {status}"),
                ));
            }
            Ok(())
        }
    }
}
