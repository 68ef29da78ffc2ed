//! Terminal presentation of diagnostics and status messages

use crate::diagnostic::{Diagnostic, Severity};
use crate::report::MirrorReport;
use console::style;

/// Enable or disable colored output for the whole process
pub fn set_colors(enabled: bool) {
    console::set_colors_enabled(enabled);
}

/// Plain-text form of a diagnostic, without color
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let path = diagnostic
        .path
        .as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default();
    match diagnostic.severity {
        Severity::Warning => format!("warning: {}{}", diagnostic.message, path),
        Severity::Error => format!("{}{}", diagnostic.message, path),
    }
}

pub fn print_diagnostic(diagnostic: &Diagnostic) {
    let text = format_diagnostic(diagnostic);
    match diagnostic.severity {
        Severity::Warning => println!("{}", style(text).yellow()),
        Severity::Error => println!("{}", style(text).red()),
    }
}

pub fn print_diagnostics(report: &MirrorReport) {
    for diagnostic in &report.diagnostics {
        print_diagnostic(diagnostic);
    }
}

pub fn print_warning(message: &str) {
    println!("{}", style(format!("warning: {}", message)).yellow());
}

pub fn print_error(message: &str) {
    println!("{}", style(format!("error: {}", message)).red());
}

pub fn print_success() {
    println!("success!");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_warning() {
        let diagnostic = Diagnostic::warning("directory exists", Path::new("site/sub"));
        assert_eq!(
            format_diagnostic(&diagnostic),
            "warning: directory exists site/sub"
        );
    }

    #[test]
    fn test_format_error() {
        let diagnostic = Diagnostic::error("failed to copy file: denied", Some(Path::new("a.txt")));
        assert_eq!(format_diagnostic(&diagnostic), "failed to copy file: denied a.txt");
    }
}
