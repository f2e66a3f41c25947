//! Actions Launcher
//!
//! CLI entry point that dispatches to subcommands. Every error ends up here
//! and is reported exactly once.

use actions_launcher::actions::Action;
use actions_launcher::cli::{commands, Cli, Commands};
use actions_launcher::config::{Config, ConfigManager};
use actions_launcher::error::LauncherResult;
use actions_launcher::platform::Platform;
use actions_launcher::ui::{self, UiContext};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = UiContext::detect();

    match run(cli, &ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::report_failure(&ctx, &e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli, ctx: &UiContext) -> LauncherResult<()> {
    // Nothing is read or fetched on an unsupported platform
    Platform::detect()?;

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);

    let launcher =
        commands::build_launcher(&cli.manifest, cli.cache_dir.as_deref(), &config, ctx).await?;

    match cli.command {
        Commands::GenerateBuildpackMatrix => {
            commands::action(Action::GenerateBuildpackMatrix, &launcher).await
        }
        Commands::GenerateChangelog => commands::action(Action::GenerateChangelog, &launcher).await,
        Commands::PrepareRelease => commands::action(Action::PrepareRelease, &launcher).await,
        Commands::UpdateBuilder => commands::action(Action::UpdateBuilder, &launcher).await,
        Commands::Exec(args) => commands::exec(args, &launcher).await,
        Commands::Resolve(args) => commands::resolve(args, &launcher).await,
    }
}

/// Logs go to stderr so the launched tool owns stdout.
/// 0 = warn, 1 = info, 2+ = debug; `RUST_LOG` overrides.
fn init_logging(verbose: u8, config: &Config) {
    let default = match verbose {
        0 => "actions_launcher=warn",
        1 => "actions_launcher=info",
        _ => "actions_launcher=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }
}
