//! Exec command - run the tool with explicit arguments

use crate::cli::args::ExecArgs;
use crate::error::LauncherResult;
use crate::inputs::EnvInputs;
use crate::launcher::{FixedArgs, Launcher};

/// Execute the exec command
pub async fn execute(args: ExecArgs, launcher: &Launcher) -> LauncherResult<()> {
    launcher
        .invoke(&FixedArgs(args.args), &EnvInputs::new())
        .await
}
