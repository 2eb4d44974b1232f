//! setup-applanga binary entry point.

use clap::Parser;
use setup_applanga::actions::{GitHubActions, Runner};
use setup_applanga::cli::Cli;
use setup_applanga::install::{Installer, default_temp_root};
use setup_applanga::tracing::init_tracing;
use setup_applanga_github::REJECTION_MESSAGE;
use setup_applanga_toolcache::ToolCache;
use std::process::ExitCode;

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.tracing_config()) {
        eprintln!("Error: Failed to initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    let cache = cli
        .tool_cache
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(ToolCache::default, ToolCache::new);
    let installer = Installer::new(
        cli.settings(),
        cache,
        default_temp_root(cli.temp_dir.as_deref()),
    );
    let mut runner = GitHubActions::from_env();

    match installer.run(&cli.request(), &mut runner).await {
        Ok(outcome) => {
            tracing::debug!(
                version = %outcome.version,
                path = ?outcome.path,
                cache_hit = outcome.cache_hit,
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_subscription_rejection() => {
            eprintln!("{REJECTION_MESSAGE}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Installation failed");
            runner.set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
