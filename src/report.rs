//! Report of a tree mirroring run

use crate::diagnostic::Diagnostic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output format of a written report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    /// Human-readable text
    #[default]
    Text,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Text => write!(f, "text"),
        }
    }
}

/// Counters accumulated during traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorStatistics {
    pub directories_created: usize,
    pub documents_converted: usize,
    pub files_copied: usize,
    /// Entries left alone because their destination already existed
    pub entries_skipped: usize,
    /// Source lines across all converted documents
    pub lines_converted: usize,
    pub warning_count: usize,
    pub error_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorReport {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    /// Start of the run, serialized as RFC 3339
    pub timestamp: DateTime<Utc>,
    pub duration_ms: u64,
    pub statistics: MirrorStatistics,
    /// Every warning and error, in traversal order
    pub diagnostics: Vec<Diagnostic>,
}

impl MirrorReport {
    pub fn new(source_root: &Path, dest_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            dest_root: dest_root.to_path_buf(),
            timestamp: Utc::now(),
            duration_ms: 0,
            statistics: MirrorStatistics::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}", diagnostic);
        if diagnostic.is_error() {
            self.statistics.error_count += 1;
        } else {
            self.statistics.warning_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.statistics.error_count > 0
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("Mirror Report\n");
        output.push_str("=============\n");
        output.push_str(&format!("Source:      {}\n", self.source_root.display()));
        output.push_str(&format!("Destination: {}\n", self.dest_root.display()));
        output.push_str(&format!("Date:        {}\n", self.timestamp.to_rfc3339()));
        output.push_str(&format!("Time:        {}ms\n\n", self.duration_ms));

        let stats = &self.statistics;
        output.push_str("Statistics\n");
        output.push_str("----------\n");
        output.push_str(&format!("Directories created: {}\n", stats.directories_created));
        output.push_str(&format!("Documents converted: {}\n", stats.documents_converted));
        output.push_str(&format!("Files copied:        {}\n", stats.files_copied));
        output.push_str(&format!("Entries skipped:     {}\n", stats.entries_skipped));
        output.push_str(&format!("Lines converted:     {}\n", stats.lines_converted));
        output.push_str(&format!("Warnings:            {}\n", stats.warning_count));
        output.push_str(&format!("Errors:              {}\n\n", stats.error_count));

        if !self.diagnostics.is_empty() {
            output.push_str("Diagnostics\n");
            output.push_str("-----------\n");
            for diagnostic in &self.diagnostics {
                let icon = if diagnostic.is_error() { "✗" } else { "⚠" };
                output.push_str(&format!("{} {}\n", icon, diagnostic));
            }
            output.push('\n');
        }

        output.push_str("Result\n");
        output.push_str("------\n");
        if self.has_errors() {
            output.push_str("✗ Completed with errors\n");
        } else if stats.warning_count > 0 {
            output.push_str("✓ Completed with warnings\n");
        } else {
            output.push_str("✓ Completed successfully\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> MirrorReport {
        let mut report = MirrorReport::new(Path::new("capsule"), Path::new("site"));
        report.statistics.documents_converted = 3;
        report.add_diagnostic(Diagnostic::warning("file exists", Path::new("site/a.html")));
        report
    }

    #[test]
    fn test_add_diagnostic_counts() {
        let mut report = sample_report();
        report.add_diagnostic(Diagnostic::error("permission denied", None));

        assert_eq!(report.statistics.warning_count, 1);
        assert_eq!(report.statistics.error_count, 1);
        assert!(report.has_errors());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn test_report_to_json() {
        let json = sample_report().to_json().unwrap();
        assert!(json.contains("\"source_root\": \"capsule\""));
        assert!(json.contains("\"severity\": \"warning\""));
        assert!(json.contains("\"documents_converted\": 3"));
    }

    #[test]
    fn test_timestamp_round_trips_through_json() {
        let report = sample_report();
        let parsed: MirrorReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed.timestamp, report.timestamp);
    }

    #[test]
    fn test_report_to_text() {
        let text = sample_report().to_text();
        assert!(text.contains("Mirror Report"));
        assert!(text.contains("Documents converted: 3"));
        assert!(text.contains("⚠ warning: file exists site/a.html"));
        assert!(text.contains("✓ Completed with warnings"));
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let report = sample_report();
        assert!(report.render(ReportFormat::Json).unwrap().starts_with('{'));
        assert!(report
            .render(ReportFormat::Text)
            .unwrap()
            .starts_with("Mirror Report"));
    }
}
