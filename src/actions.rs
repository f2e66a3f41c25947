//! Argument builders for the shipped actions
//!
//! Each action maps its workflow inputs onto one subcommand of the launched
//! tool. Validation of the values themselves is left to the tool.

use crate::error::{LauncherError, LauncherResult};
use crate::inputs::ActionInputs;
use crate::launcher::ArgsBuilder;
use std::fmt;

/// Actions that launch the release tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// List buildpacks as a job matrix
    GenerateBuildpackMatrix,
    /// Render changelog entries for unreleased or released changes
    GenerateChangelog,
    /// Bump versions and changelogs for a release
    PrepareRelease,
    /// Point builders at a newly released buildpack
    UpdateBuilder,
}

impl Action {
    /// Subcommand of the launched tool
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::GenerateBuildpackMatrix => "generate-buildpack-matrix",
            Self::GenerateChangelog => "generate-changelog",
            Self::PrepareRelease => "prepare-release",
            Self::UpdateBuilder => "update-builder",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

impl ArgsBuilder for Action {
    fn build(&self, inputs: &dyn ActionInputs) -> LauncherResult<Vec<String>> {
        let mut args = vec![self.subcommand().to_string()];

        match self {
            Self::GenerateBuildpackMatrix => {}
            Self::GenerateChangelog => {
                // An explicit version wins over `unreleased`
                let unreleased = inputs.get_boolean("unreleased")?;
                match inputs.get_optional_string("version") {
                    Some(version) => {
                        if unreleased {
                            tracing::debug!("Ignoring unreleased, version {} given", version);
                        }
                        args.extend(["--version".to_string(), version]);
                    }
                    None => args.push("--unreleased".to_string()),
                }
            }
            Self::PrepareRelease => {
                args.push("--bump".to_string());
                args.push(inputs.get_required_string("bump")?);
            }
            Self::UpdateBuilder => {
                let path = inputs
                    .get_optional_string("path")
                    .unwrap_or_else(|| ".".to_string());
                let buildpack_id = inputs.get_required_string("buildpack_id")?;
                let buildpack_version = inputs.get_required_string("buildpack_version")?;
                let buildpack_uri = inputs.get_required_string("buildpack_uri")?;
                let builders = inputs.get_string_list("builders");
                if builders.is_empty() {
                    return Err(LauncherError::MissingInput("builders".to_string()));
                }

                args.extend([
                    "--path".to_string(),
                    path,
                    "--buildpack-id".to_string(),
                    buildpack_id,
                    "--buildpack-version".to_string(),
                    buildpack_version,
                    "--buildpack-uri".to_string(),
                    buildpack_uri,
                    "--builders".to_string(),
                    builders.join(","),
                ]);
            }
        }

        Ok(args)
    }
}
