//! Resolve command - populate the tool cache and print the binary path

use crate::cli::args::ResolveArgs;
use crate::error::LauncherResult;
use crate::launcher::{Launcher, Resolution};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct ResolutionJson<'a> {
    path: String,
    key: String,
    url: &'a str,
    cache_hit: bool,
}

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, launcher: &Launcher) -> LauncherResult<()> {
    let platform = launcher.platform()?;
    let resolution = launcher.resolve(platform).await?;

    let source = if resolution.cache_hit { "cached" } else { "downloaded" };
    info!("Resolved {} ({})", resolution.artifact.key, source);

    if args.json {
        println!("{}", render_json(&resolution)?);
    } else {
        println!("{}", resolution.binary_path.display());
    }

    Ok(())
}

fn render_json(resolution: &Resolution) -> LauncherResult<String> {
    let record = ResolutionJson {
        path: resolution.binary_path.display().to_string(),
        key: resolution.artifact.key.to_string(),
        url: &resolution.artifact.url,
        cache_hit: resolution.cache_hit,
    };
    Ok(serde_json::to_string_pretty(&record)?)
}
