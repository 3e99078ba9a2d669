use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Structural defect that keeps a declared unit from being split into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    MissingInterface,
    MissingImplementation,
    InterfaceAfterImplementation,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MalformedReason::MissingInterface => "missing `interface` section",
            MalformedReason::MissingImplementation => "missing `implementation` section",
            MalformedReason::InterfaceAfterImplementation => {
                "`interface` appears after `implementation`"
            }
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("unit {unit}{}: {reason}", located(.path))]
    MalformedSource {
        path: Option<PathBuf>,
        unit: String,
        reason: MalformedReason,
    },
}

fn located(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }

    /// Malformed sources are skipped per file; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::MalformedSource { .. })
    }

    /// Attaches the originating file to a malformed-source error.
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            AnalysisError::MalformedSource { unit, reason, .. } => AnalysisError::MalformedSource {
                path: Some(file.into()),
                unit,
                reason,
            },
            other => other,
        }
    }
}
