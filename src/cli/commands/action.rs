//! Action commands - run the tool with arguments built from step inputs

use crate::actions::Action;
use crate::error::LauncherResult;
use crate::inputs::EnvInputs;
use crate::launcher::Launcher;
use tracing::info;

/// Execute an action command
pub async fn execute(action: Action, launcher: &Launcher) -> LauncherResult<()> {
    info!(
        "Running {} with {} {}",
        action,
        launcher.descriptor().name,
        launcher.descriptor().version
    );
    launcher.invoke(&action, &EnvInputs::new()).await
}
