pub mod config;
pub mod converter;
pub mod diagnostic;
pub mod mirror;
pub mod prompt;
pub mod report;
pub mod styling;
pub mod translator;

pub use converter::{convert, convert_reader, convert_str, ConversionOutput, ConversionSummary};
pub use diagnostic::{Diagnostic, Severity};
pub use mirror::{mirror, MirrorOptions, TreeMirror};
pub use report::{MirrorReport, ReportFormat};
pub use translator::{translate, ElementKind, Fragment};
