//! relkit CLI entry point.
//!
//! Reads per-tool version requests from the GitHub Actions
//! environment, installs every requested tool, publishes each success
//! on `GITHUB_PATH`, and exits non-zero if any requested tool failed.
//! One tool's failure never prevents the others from being installed.

mod catalog;
mod cli;
mod logging;

use std::collections::HashMap;

use relkit_core::{VersionRequest, actions};
use relkit_github::ReleaseClient;
use relkit_installer::{FailedTool, Installer, RunSummary};
use tracing::info;

#[tokio::main]
async fn main() {
    // The tracing infrastructure may be unusable during a panic, so
    // the hook writes to stderr directly.
    #[allow(clippy::print_stderr)]
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();
    if let Err(error) = logging::init_tracing(cli.log_format, cli.log_level) {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("{error:?}");
        }
        std::process::exit(1);
    }

    let summary = run(&cli).await;
    report(summary);
}

/// Gather requests, install everything, and publish path additions.
async fn run(cli: &cli::Cli) -> RunSummary {
    let specs = catalog::builtin();

    let requests: HashMap<String, VersionRequest> = specs
        .iter()
        .filter_map(|spec| {
            actions::get_input(&spec.name)
                .map(|raw| (spec.name.clone(), VersionRequest::parse(&raw)))
        })
        .collect();

    let installer = Installer::new(ReleaseClient::new(), cli::install_root(cli));
    let mut summary = installer.run_all(&specs, &requests).await;

    // Publication is part of each tool's outcome: a success whose
    // directory cannot be published is a failure for that tool only.
    let mut published = Vec::with_capacity(summary.installed.len());
    for installed in summary.installed.drain(..) {
        match actions::add_path(&installed.dir) {
            Ok(()) => {
                info!(tool = %installed.name, version = %installed.version, "Tool ready");
                published.push(installed);
            }
            Err(error) => summary.failures.push(FailedTool {
                name: installed.name,
                error,
            }),
        }
    }
    summary.installed = published;

    summary
}

/// Render failures through miette and map the summary to an exit code.
#[allow(clippy::print_stderr)]
fn report(summary: RunSummary) -> ! {
    let failed = summary.is_failure();
    for FailedTool { name, error } in summary.failures {
        eprintln!("{name}: {:?}", miette::Report::new(error));
    }
    std::process::exit(i32::from(failed));
}
