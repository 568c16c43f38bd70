//! Subprocess-backed acquisition tool.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::error::FallbackError;
use super::{AcquisitionTool, ToolOutput};

/// Default external tool program.
pub const DEFAULT_TOOL_PROGRAM: &str = "scidownl";

/// Default label written to the success log for tool acquisitions.
pub const DEFAULT_TOOL_LABEL: &str = "SciDownl";

/// Runs `<program> download --title <title> --out <path>` and captures its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTool {
    program: String,
    label: String,
}

impl Default for CommandTool {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_PROGRAM, DEFAULT_TOOL_LABEL)
    }
}

impl CommandTool {
    /// Creates a tool for `program`, logged under `label`.
    #[must_use]
    pub fn new(program: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            label: label.into(),
        }
    }

    /// Program executed for each fetch.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl AcquisitionTool for CommandTool {
    fn label(&self) -> &str {
        &self.label
    }

    #[instrument(skip(self, out), fields(program = %self.program))]
    async fn fetch(&self, title: &str, out: &Path) -> Result<ToolOutput, FallbackError> {
        debug!(out = %out.display(), "running acquisition tool");
        let output = Command::new(&self.program)
            .arg("download")
            .arg("--title")
            .arg(title)
            .arg("--out")
            .arg(out)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| FallbackError::launch(&self.program, e))?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_tool_is_scidownl() {
        let tool = CommandTool::default();
        assert_eq!(tool.program(), "scidownl");
        assert_eq!(tool.label(), "SciDownl");
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_error() {
        let temp = TempDir::new().unwrap();
        let tool = CommandTool::new("definitely-not-an-installed-tool-7f3a", "Missing");

        let result = tool.fetch("Title", &temp.path().join("x.pdf")).await;

        assert!(matches!(result, Err(FallbackError::Launch { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_captured() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("x.pdf");

        let ok = CommandTool::new("true", "T").fetch("Title", &out).await.unwrap();
        let failed = CommandTool::new("false", "F").fetch("Title", &out).await.unwrap();

        assert!(ok.success());
        assert_eq!(failed.exit_code, Some(1));
        assert!(!failed.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_arguments_are_passed_in_order() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("Paper - A.pdf");

        let output = CommandTool::new("echo", "Echo")
            .fetch("A Paper: Title", &out)
            .await
            .unwrap();

        assert_eq!(
            output.stdout.trim_end(),
            format!("download --title A Paper: Title --out {}", out.display())
        );
    }
}
