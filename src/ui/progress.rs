//! Progress indicators with CI fallback

use super::context::UiContext;
use crate::launcher::DownloadProgress;
use crate::release::ReleaseArtifact;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// A task spinner drawn on stderr in interactive terminals.
///
/// In CI the spinner stays silent; progress is visible through logging.
pub struct TaskSpinner {
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    /// Create a new spinner
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if !self.interactive {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}  {elapsed:.dim}")
        {
            spinner.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(spinner);
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
            eprintln!("  {} {}", style("✓").green(), message);
        }
    }

    /// Stop with error message
    pub fn stop_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
            eprintln!("  {} {}", style("✗").red(), message);
        }
    }

    /// Clear the spinner without any message
    pub fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for TaskSpinner {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Shows a [`TaskSpinner`] while a release archive downloads
pub struct DownloadSpinner {
    ctx: UiContext,
    active: Mutex<Option<TaskSpinner>>,
}

impl DownloadSpinner {
    /// Create a spinner reporter for `ctx`
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            ctx: ctx.clone(),
            active: Mutex::new(None),
        }
    }
}

impl DownloadProgress for DownloadSpinner {
    fn started(&self, artifact: &ReleaseArtifact) {
        let mut spinner = TaskSpinner::new(&self.ctx);
        spinner.start(&format!("Downloading {}...", artifact.archive_name));
        if let Ok(mut active) = self.active.lock() {
            *active = Some(spinner);
        }
    }

    fn finished(&self, artifact: &ReleaseArtifact, success: bool) {
        let spinner = self.active.lock().ok().and_then(|mut active| active.take());
        if let Some(mut spinner) = spinner {
            if success {
                spinner.stop(&format!("Downloaded {}", artifact.archive_name));
            } else {
                spinner.stop_error(&format!("Could not download {}", artifact.archive_name));
            }
        }
    }
}
