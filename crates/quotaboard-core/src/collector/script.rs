//! Collector that runs an external script and reads its stdout.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::{CollectorError, QuotaCollector};
use crate::snapshot::RawSnapshot;

/// How the collector script is launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpreter {
    /// Execute the collector path itself
    Direct,
    /// Run `program [args...] <collector path>`
    Command { program: String, args: Vec<String> },
}

impl Interpreter {
    /// Pick an interpreter from the script extension
    pub fn infer(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("ps1") => Self::powershell(),
            Some("sh") => Self::Command {
                program: "sh".to_string(),
                args: Vec::new(),
            },
            Some("py") => Self::Command {
                program: if cfg!(windows) { "python" } else { "python3" }.to_string(),
                args: Vec::new(),
            },
            _ => Self::Direct,
        }
    }

    /// Windows PowerShell, or `pwsh` elsewhere, with script policy bypassed
    pub fn powershell() -> Self {
        let program = if cfg!(windows) { "powershell" } else { "pwsh" };
        Self::Command {
            program: program.to_string(),
            args: ["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Runs a collector script per fetch. No timeout is applied; a hung script
/// stalls only the fetch waiting on it.
#[derive(Debug, Clone)]
pub struct ScriptCollector {
    path: PathBuf,
    interpreter: Interpreter,
}

impl ScriptCollector {
    /// Create a collector for `path`, inferring the interpreter
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let interpreter = Interpreter::infer(&path);
        Self { path, interpreter }
    }

    /// Override the inferred interpreter
    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Human-readable command line (for logs)
    pub fn command_line(&self) -> String {
        match &self.interpreter {
            Interpreter::Direct => format!("\"{}\"", self.path.display()),
            Interpreter::Command { program, args } => {
                let mut parts = vec![program.clone()];
                parts.extend(args.iter().cloned());
                parts.push(format!("\"{}\"", self.path.display()));
                parts.join(" ")
            }
        }
    }

    /// Program actually spawned
    fn program(&self) -> PathBuf {
        match &self.interpreter {
            Interpreter::Direct => self.path.clone(),
            Interpreter::Command { program, .. } => PathBuf::from(program),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = match &self.interpreter {
            Interpreter::Direct => Command::new(&self.path),
            Interpreter::Command { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(&self.path);
                cmd
            }
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl QuotaCollector for ScriptCollector {
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, CollectorError> {
        debug!("Running collector: {}", self.command_line());

        let output = self
            .command()
            .output()
            .await
            .map_err(|source| CollectorError::Spawn {
                program: self.program(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(CollectorError::Exited {
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            warn!("Collector wrote to stderr: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        RawSnapshot::from_output(&stdout).map_err(|source| CollectorError::Parse {
            raw: stdout,
            source,
        })
    }
}
