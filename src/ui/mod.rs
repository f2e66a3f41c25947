//! UI module for launcher output
//!
//! On success the launcher prints nothing of its own; the launched tool owns
//! stdout. Failures are reported exactly once through [`report_failure`],
//! as a workflow `::error::` command when running inside GitHub Actions and
//! as styled `Error:`/`Hint:` lines otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use actions_launcher::ui::{self, TaskSpinner, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Downloading mycli-v1.2.3-linux-x64.tar.gz...");
//! // ... do work ...
//! spinner.stop("Downloaded mycli-v1.2.3-linux-x64.tar.gz");
//!
//! if let Err(e) = result {
//!     ui::report_failure(&ctx, &e);
//! }
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{escape_data, format_failure, report_failure};
pub use progress::{DownloadSpinner, TaskSpinner};
