//! Shared fixtures for CLI tests.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestContext {
    pub cmd: Command,
    pub home: TempDir,
}

impl TestContext {
    /// Write `contents` as the configuration file used by `cmd`.
    pub fn with_config(mut self, contents: &str) -> Self {
        let path = self.home.path().join("config.json");
        std::fs::write(&path, contents).expect("write config");
        self.cmd.arg("--config").arg(&path);
        self
    }

    /// Install an executable authority client that runs `script`.
    #[cfg(unix)]
    pub fn with_client(mut self, script: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let path = self.home.path().join("fake-midclt");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).expect("write client");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod client");
        self.cmd.arg("--client").arg(&path);
        self
    }

    pub fn missing_client(&self) -> PathBuf {
        self.home.path().join("no-such-client")
    }
}

pub fn mountguard() -> TestContext {
    let home = TempDir::new().expect("create temp dir");
    let mut cmd = Command::cargo_bin("mountguard").expect("find mountguard binary");
    cmd.env_remove("MOUNTGUARD_CONFIG");
    cmd.env_remove("RUST_LOG");
    TestContext { cmd, home }
}
