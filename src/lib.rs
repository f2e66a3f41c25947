//! Actions Launcher - run a released CLI tool from a GitHub Actions step
//!
//! Reads the package manifest, resolves the matching release archive into
//! the runner's tool cache and runs the binary with arguments built from the
//! step's inputs.

pub mod actions;
pub mod cache;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod inputs;
pub mod launcher;
pub mod manifest;
pub mod platform;
pub mod release;
pub mod ui;

pub use error::{LauncherError, LauncherResult};
