//! Integration tests for the launcher binary

mod cli_tests {
    use actions_launcher::cache::MARKER_FILE;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[package]
name = "mycli"
version = "1.2.3"
repository = "https://github.com/acme/mycli.git"

[[bin]]
name = "mycli"
"#;

    /// Workspace with a manifest, an empty tool cache and a config pointing
    /// downloads at a closed local port
    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("Cargo.toml"), MANIFEST).unwrap();
            std::fs::write(
                dir.path().join("config.toml"),
                "[download]\nbase_url = \"http://127.0.0.1:9\"\n",
            )
            .unwrap();
            std::fs::create_dir_all(dir.path().join("tools")).unwrap();
            Self { dir }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn cache_entry(&self) -> PathBuf {
            self.path().join("tools/acme/mycli/1.2.3/x64")
        }

        /// Store a shell script as the cached `mycli` binary
        #[cfg(unix)]
        fn seed_cache(&self) -> PathBuf {
            use std::os::unix::fs::PermissionsExt;

            let entry = self.cache_entry();
            std::fs::create_dir_all(&entry).unwrap();
            let binary = entry.join("mycli");
            std::fs::write(
                &binary,
                "#!/bin/sh\necho \"mycli $*\"\nexit ${MYCLI_EXIT:-0}\n",
            )
            .unwrap();
            std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
            std::fs::write(
                entry.join(MARKER_FILE),
                r#"{"binary":"mycli","stored_at":"2024-01-01T00:00:00Z"}"#,
            )
            .unwrap();
            binary
        }

        fn cmd(&self) -> Command {
            let mut cmd = launcher();
            cmd.current_dir(self.path())
                .env("RUNNER_TOOL_CACHE", self.path().join("tools"))
                .env("ACTIONS_LAUNCHER_CONFIG", self.path().join("config.toml"))
                .env("RUNNER_TEMP", self.path().join("tmp"));
            cmd
        }
    }

    fn launcher() -> Command {
        let mut cmd = cargo_bin_cmd!("actions-launcher");
        cmd.env_remove("GITHUB_ACTIONS")
            .env_remove("RUNNER_TOOL_CACHE")
            .env_remove("ACTIONS_LAUNCHER_MANIFEST")
            .env_remove("ACTIONS_LAUNCHER_CONFIG")
            .env_remove("INPUT_BUMP")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        launcher()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("prepare-release"))
            .stdout(predicate::str::contains("resolve"));
    }

    #[test]
    fn version_displays() {
        launcher()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("actions-launcher"));
    }

    #[test]
    fn missing_manifest_fails() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["--manifest", "missing.toml", "resolve"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("reading manifest"));
    }

    #[test]
    fn invalid_config_fails() {
        let ws = Workspace::new();
        std::fs::write(ws.path().join("config.toml"), "[download\n").unwrap();
        ws.cmd()
            .arg("resolve")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn missing_input_fails_before_download() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("prepare-release")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Input required and not supplied: bump"))
            .stderr(predicate::str::contains("Failed to download").not());

        assert!(!ws.cache_entry().exists());
    }

    #[test]
    fn missing_input_in_github_actions() {
        let ws = Workspace::new();
        ws.cmd()
            .env("GITHUB_ACTIONS", "true")
            .arg("prepare-release")
            .assert()
            .code(1)
            .stdout(predicate::str::starts_with(
                "::error::Input required and not supplied: bump",
            ));
    }

    #[test]
    fn download_failure_is_reported_once() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("resolve")
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "Failed to download http://127.0.0.1:9/acme/mycli/releases/download/v1.2.3/mycli-v1.2.3-",
            ))
            .stderr(predicate::str::contains("Error:").count(1));

        assert!(!ws.cache_entry().exists());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_uses_cached_binary() {
        let ws = Workspace::new();
        let binary = ws.seed_cache();

        ws.cmd()
            .arg("resolve")
            .assert()
            .success()
            .stdout(format!("{}\n", binary.display()));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_json() {
        let ws = Workspace::new();
        ws.seed_cache();

        ws.cmd()
            .args(["resolve", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"key\": \"acme/mycli@1.2.3\""))
            .stdout(predicate::str::contains("\"cache_hit\": true"));
    }

    #[cfg(unix)]
    #[test]
    fn action_runs_cached_binary_with_inputs() {
        let ws = Workspace::new();
        ws.seed_cache();

        ws.cmd()
            .env("INPUT_BUMP", "minor")
            .arg("prepare-release")
            .assert()
            .success()
            .stdout("mycli prepare-release --bump minor\n");
    }

    #[cfg(unix)]
    #[test]
    fn exec_passes_arguments() {
        let ws = Workspace::new();
        ws.seed_cache();

        ws.cmd()
            .args(["exec", "--", "generate-changelog", "--unreleased"])
            .assert()
            .success()
            .stdout("mycli generate-changelog --unreleased\n");
    }

    #[cfg(unix)]
    #[test]
    fn tool_exit_code_is_propagated() {
        let ws = Workspace::new();
        ws.seed_cache();

        ws.cmd()
            .env("MYCLI_EXIT", "3")
            .args(["exec", "--", "generate-buildpack-matrix"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("mycli failed with exit code 3"));
    }
}
