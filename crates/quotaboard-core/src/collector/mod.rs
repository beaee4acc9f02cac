//! Collectors produce the quota status document.
//!
//! The relay only depends on [`QuotaCollector`]; the subprocess mechanism
//! ([`ScriptCollector`]) can be swapped for a fixed document
//! ([`StaticCollector`]) in demo mode and tests.

mod fixed;
mod script;

use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::snapshot::RawSnapshot;

pub use fixed::StaticCollector;
pub use script::{Interpreter, ScriptCollector};

/// Failure to obtain a document from a collector
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The collector process could not be started
    #[error("failed to start collector {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collector ran but exited unsuccessfully
    #[error("collector exited with {status}{}", stderr_suffix(.stderr))]
    Exited { status: String, stderr: String },

    /// The collector exited successfully but stdout was not JSON
    #[error("failed to parse collector output: {source}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Source of quota status documents
pub trait QuotaCollector: Send + Sync {
    /// Run the collector once and return its document
    fn fetch_snapshot(&self) -> impl Future<Output = Result<RawSnapshot, CollectorError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exited_message_includes_stderr() {
        let err = CollectorError::Exited {
            status: "exit status: 3".to_string(),
            stderr: "  language server not running\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "collector exited with exit status: 3: language server not running"
        );
    }

    #[test]
    fn test_exited_message_without_stderr() {
        let err = CollectorError::Exited {
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "collector exited with exit status: 1");
    }
}
