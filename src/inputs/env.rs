//! Inputs passed by the runner as `INPUT_*` environment variables

use super::ActionInputs;

/// Reads inputs the way the Actions runner exposes them: `INPUT_` followed by
/// the input name upper-cased, with spaces replaced by underscores.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl EnvInputs {
    /// Create a reader over the current process environment
    pub fn new() -> Self {
        Self
    }

    /// Environment variable holding input `name`
    pub fn variable_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl ActionInputs for EnvInputs {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(Self::variable_name(name))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
