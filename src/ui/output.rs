//! Output functions for consistent CLI formatting

use super::context::UiContext;
use crate::error::LauncherError;
use console::style;

/// Escape a message for use as workflow command data
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render the single failure report for `error`
pub fn format_failure(ctx: &UiContext, error: &LauncherError) -> String {
    let message = error.to_string();

    if ctx.in_github_actions() {
        let mut data = message;
        if let Some(hint) = error.hint() {
            data.push('\n');
            data.push_str(hint);
        }
        return format!("::error::{}", escape_data(&data));
    }

    let mut out = format!("{} {}", style("Error:").red().bold(), message);
    if let Some(hint) = error.hint() {
        out.push('\n');
        out.push_str(&format!("{} {}", style("Hint:").yellow(), hint));
    }
    out
}

/// Report a failure. Workflow commands go to stdout where the runner reads
/// them; everything else goes to stderr.
pub fn report_failure(ctx: &UiContext, error: &LauncherError) {
    let report = format_failure(ctx, error);
    if ctx.in_github_actions() {
        println!("{}", report);
    } else {
        eprintln!("{}", report);
    }
}
