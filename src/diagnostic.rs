//! Warnings and errors reported while mirroring a tree

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single reportable condition, scoped to one tree entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Offending path, if the condition concerns one
    pub path: Option<PathBuf>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, path: &Path) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            path: Some(path.to_path_buf()),
        }
    }

    pub fn error(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(path) = &self.path {
            write!(f, " {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let diagnostic = Diagnostic::warning("file exists", Path::new("out/a.html"));
        assert!(diagnostic.is_warning());
        assert_eq!(diagnostic.to_string(), "warning: file exists out/a.html");
    }

    #[test]
    fn test_error_without_path() {
        let diagnostic = Diagnostic::error("permission denied", None);
        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.to_string(), "error: permission denied");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
