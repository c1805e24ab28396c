//! Authority transport through the `midclt` command-line client.
//!
//! Each call runs `midclt call <method> <arg>...` with every argument
//! serialized as JSON, and parses stdout as the JSON result.

use std::path::{Path, PathBuf};
use std::process::Command;

use mountguard_shared::errors::{MountError, MountResult};
use serde_json::Value;

use super::Authority;

const DEFAULT_CLIENT: &str = "midclt";

/// [`Authority`] backed by the `midclt` binary.
#[derive(Debug, Clone)]
pub struct MidcltAuthority {
    program: PathBuf,
}

impl MidcltAuthority {
    /// Use `midclt` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_CLIENT),
        }
    }

    /// Use a specific client binary.
    pub fn with_program(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn build_command(&self, method: &str, args: &[Value]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("call").arg(method);
        for arg in args {
            cmd.arg(arg.to_string());
        }
        cmd
    }
}

impl Default for MidcltAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl Authority for MidcltAuthority {
    fn invoke(&self, method: &str, args: &[Value]) -> MountResult<Value> {
        let call_failed = |message: String| MountError::AuthorityCall {
            method: method.to_string(),
            message,
        };

        tracing::debug!(method = %method, program = %self.program.display(), "Invoking authority");

        let output = self
            .build_command(method, args)
            .output()
            .map_err(|e| call_failed(format!("failed to run {}: {}", self.program.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(call_failed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(stdout).map_err(|e| call_failed(format!("invalid JSON output: {}", e)))
    }
}
