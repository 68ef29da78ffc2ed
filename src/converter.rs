//! Gemtext document to HTML conversion
//!
//! Drives the line translator over a whole document while tracking the two
//! block-level modes, preformatted and list. Neither mode is closed
//! automatically: an open list at a fence or at end of input stays open, and
//! an unterminated preformatted block is only reported through
//! [`ConversionSummary::truncated_preformat`].

use crate::translator::{translate, ElementKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Line toggling preformatted mode
pub const FENCE: &str = "```";
/// Lines written before the first translated line
pub const PROLOGUE: [&str; 2] = ["<!DOCTYPE HTML>", "<html>"];
/// Line written after the last translated line
pub const EPILOGUE: &str = "</html>";
/// Emitted for every blank source line
pub const LINE_BREAK: &str = "<br>";

const PRE_OPEN: &str = "<pre>";
const PRE_CLOSE: &str = "</pre>";
const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

/// Block-level mode of a document being converted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionState {
    pub in_preformat_block: bool,
    /// Only ever set while `in_preformat_block` is false
    pub in_list_block: bool,
}

/// Statistics gathered while converting one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Input ended inside a preformatted block
    pub truncated_preformat: bool,
    pub source_lines: usize,
    pub blank_lines: usize,
    /// Lines copied verbatim inside preformatted blocks
    pub preformatted_lines: usize,
    /// Number of translated lines per element kind
    pub element_counts: HashMap<ElementKind, usize>,
}

impl ConversionSummary {
    fn increment_element(&mut self, kind: ElementKind) {
        *self.element_counts.entry(kind).or_insert(0) += 1;
    }

    pub fn element_count(&self, kind: ElementKind) -> usize {
        self.element_counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Output of an in-memory conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    pub lines: Vec<String>,
    pub summary: ConversionSummary,
}

impl ConversionOutput {
    pub fn truncated_preformat(&self) -> bool {
        self.summary.truncated_preformat
    }

    /// Output joined into a document, one line per `\n`
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for line in &self.lines {
            html.push_str(line);
            html.push('\n');
        }
        html
    }
}

/// Error raised by [`convert_reader`]
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read source: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

/// Line-by-line conversion state machine
#[derive(Debug, Default)]
pub struct DocumentConverter {
    state: ConversionState,
    summary: ConversionSummary,
}

impl DocumentConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConversionState {
        self.state
    }

    /// Convert one source line, appending the produced output lines to `out`.
    /// A line produces one output line, or two when a list opens or closes.
    pub fn feed(&mut self, line: &str, out: &mut Vec<String>) {
        self.summary.source_lines += 1;

        if line.is_empty() {
            self.summary.blank_lines += 1;
            out.push(LINE_BREAK.to_string());
            return;
        }

        if line == FENCE {
            self.state.in_preformat_block = !self.state.in_preformat_block;
            let tag = if self.state.in_preformat_block {
                PRE_OPEN
            } else {
                PRE_CLOSE
            };
            out.push(tag.to_string());
            return;
        }

        if self.state.in_preformat_block {
            self.summary.preformatted_lines += 1;
            out.push(line.to_string());
            return;
        }

        let fragment = translate(line);
        self.summary.increment_element(fragment.kind());
        match (fragment.is_list_item(), self.state.in_list_block) {
            (true, false) => {
                self.state.in_list_block = true;
                out.push(LIST_OPEN.to_string());
            }
            (false, true) => {
                self.state.in_list_block = false;
                out.push(LIST_CLOSE.to_string());
            }
            _ => {}
        }
        out.push(fragment.to_string());
    }

    /// Finish the document. The final state is reported, not corrected.
    pub fn finish(mut self) -> ConversionSummary {
        self.summary.truncated_preformat = self.state.in_preformat_block;
        self.summary
    }
}

/// Convert a whole document held in memory
pub fn convert<I, S>(source_lines: I) -> ConversionOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines: Vec<String> = PROLOGUE.iter().map(|l| l.to_string()).collect();
    let mut converter = DocumentConverter::new();
    for line in source_lines {
        converter.feed(line.as_ref(), &mut lines);
    }
    lines.push(EPILOGUE.to_string());
    ConversionOutput {
        lines,
        summary: converter.finish(),
    }
}

/// Convert gemtext text; lines are split as by [`str::lines`]
pub fn convert_str(text: &str) -> ConversionOutput {
    convert(text.lines())
}

/// Stream a document from `reader` to `writer`, one output line at a time.
///
/// A trailing `\r` is stripped from every source line. Bytes that are not
/// valid UTF-8 surface as [`ConvertError::Read`].
pub fn convert_reader<R, W>(mut reader: R, mut writer: W) -> Result<ConversionSummary, ConvertError>
where
    R: BufRead,
    W: Write,
{
    for line in PROLOGUE {
        writeln!(writer, "{line}").map_err(ConvertError::Write)?;
    }

    let mut converter = DocumentConverter::new();
    let mut buf = String::new();
    let mut out = Vec::with_capacity(2);
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf).map_err(ConvertError::Read)?;
        if read == 0 {
            break;
        }
        let line = buf.strip_suffix('\n').unwrap_or(&buf);
        let line = line.strip_suffix('\r').unwrap_or(line);

        converter.feed(line, &mut out);
        for produced in out.drain(..) {
            writeln!(writer, "{produced}").map_err(ConvertError::Write)?;
        }
    }

    writeln!(writer, "{EPILOGUE}").map_err(ConvertError::Write)?;
    writer.flush().map_err(ConvertError::Write)?;
    Ok(converter.finish())
}
