//! Workflow inputs
//!
//! Argument builders read action inputs through [`ActionInputs`] so they do
//! not care whether values come from the runner environment or a fixed map.

mod env;

pub use env::EnvInputs;

use crate::error::{LauncherError, LauncherResult};
use std::collections::HashMap;

/// Read access to an action's named inputs
pub trait ActionInputs: Send + Sync {
    /// Raw value of an input, `None` when absent or empty
    fn get(&self, name: &str) -> Option<String>;

    /// Value of an input that must be supplied
    fn get_required_string(&self, name: &str) -> LauncherResult<String> {
        self.get(name)
            .ok_or_else(|| LauncherError::MissingInput(name.to_string()))
    }

    /// Value of an optional input
    fn get_optional_string(&self, name: &str) -> Option<String> {
        self.get(name)
    }

    /// Boolean input following the YAML 1.2 core schema. Absent means false.
    fn get_boolean(&self, name: &str) -> LauncherResult<bool> {
        match self.get(name).as_deref() {
            None => Ok(false),
            Some("true" | "True" | "TRUE") => Ok(true),
            Some("false" | "False" | "FALSE") => Ok(false),
            Some(other) => Err(LauncherError::InvalidInput {
                name: name.to_string(),
                reason: format!("{:?} is not one of true, True, TRUE, false, False, FALSE", other),
            }),
        }
    }

    /// Multi-line input, one entry per non-empty line
    fn get_string_list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|value| split_lines(&value))
            .unwrap_or_default()
    }
}

fn split_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inputs held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticInputs {
    values: HashMap<String, String>,
}

impl StaticInputs {
    /// Create an empty input set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ActionInputs for StaticInputs {
    fn get(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
