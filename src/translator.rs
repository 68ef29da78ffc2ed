//! Line-level gemtext to HTML translation
//!
//! Every source line outside a preformatted block is matched against a fixed,
//! ordered table of anchored patterns. The first pattern that matches decides
//! the element kind; a line that matches nothing becomes a paragraph.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Structural kind of a translated line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    Heading1,
    Heading2,
    Heading3,
    ListItem,
    Quote,
    Link,
    /// Fallback for lines without a structural prefix
    Paragraph,
}

impl ElementKind {
    /// Name of the HTML element wrapping this kind
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Heading1 => "h1",
            ElementKind::Heading2 => "h2",
            ElementKind::Heading3 => "h3",
            ElementKind::ListItem => "li",
            ElementKind::Quote => "blockquote",
            ElementKind::Link => "a",
            ElementKind::Paragraph => "p",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Heading1 => write!(f, "heading1"),
            ElementKind::Heading2 => write!(f, "heading2"),
            ElementKind::Heading3 => write!(f, "heading3"),
            ElementKind::ListItem => write!(f, "list_item"),
            ElementKind::Quote => write!(f, "quote"),
            ElementKind::Link => write!(f, "link"),
            ElementKind::Paragraph => write!(f, "paragraph"),
        }
    }
}

/// One translated output unit, borrowing its text from the source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// `level` is always 1, 2 or 3
    Heading { level: u8, text: &'a str },
    ListItem(&'a str),
    Quote(&'a str),
    Link { target: &'a str, label: &'a str },
    Paragraph(&'a str),
}

impl Fragment<'_> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Fragment::Heading { level: 1, .. } => ElementKind::Heading1,
            Fragment::Heading { level: 2, .. } => ElementKind::Heading2,
            Fragment::Heading { .. } => ElementKind::Heading3,
            Fragment::ListItem(_) => ElementKind::ListItem,
            Fragment::Quote(_) => ElementKind::Quote,
            Fragment::Link { .. } => ElementKind::Link,
            Fragment::Paragraph(_) => ElementKind::Paragraph,
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, Fragment::ListItem(_))
    }
}

/// Renders the fragment as a single line of HTML. Content is inserted verbatim.
impl fmt::Display for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Heading { level, text } => write!(f, "<h{level}>{text}</h{level}>"),
            Fragment::ListItem(text) => write!(f, "<li>{text}</li>"),
            Fragment::Quote(text) => write!(f, "<blockquote>{text}</blockquote>"),
            Fragment::Link { target, label } => write!(f, "<a href=\"{target}\">{label}</a><br>"),
            Fragment::Paragraph(text) => write!(f, "<p>{text}</p>"),
        }
    }
}

/// An anchored line pattern paired with the element kind it produces
struct TranslationRule {
    pattern: Regex,
    kind: ElementKind,
}

impl TranslationRule {
    fn new(pattern: &str, kind: ElementKind) -> Self {
        Self {
            // patterns are compiled-in literals
            pattern: Regex::new(pattern).expect("invalid translation rule pattern"),
            kind,
        }
    }

    fn apply<'a>(&self, line: &'a str) -> Option<Fragment<'a>> {
        let captures = self.pattern.captures(line)?;
        let first = captures.get(1).map_or("", |m| m.as_str());
        let fragment = match self.kind {
            ElementKind::Heading1 => Fragment::Heading { level: 1, text: first },
            ElementKind::Heading2 => Fragment::Heading { level: 2, text: first },
            ElementKind::Heading3 => Fragment::Heading { level: 3, text: first },
            ElementKind::ListItem => Fragment::ListItem(first),
            ElementKind::Quote => Fragment::Quote(first),
            ElementKind::Link => Fragment::Link {
                target: first,
                label: captures
                    .get(2)
                    .map_or("", |m| m.as_str().trim_start_matches(' ')),
            },
            ElementKind::Paragraph => Fragment::Paragraph(line),
        };
        Some(fragment)
    }
}

// Longest heading prefix first.
static RULES: LazyLock<Vec<TranslationRule>> = LazyLock::new(|| {
    vec![
        TranslationRule::new(r"^### (.*)$", ElementKind::Heading3),
        TranslationRule::new(r"^## (.*)$", ElementKind::Heading2),
        TranslationRule::new(r"^# (.*)$", ElementKind::Heading1),
        TranslationRule::new(r"^\* (.*)$", ElementKind::ListItem),
        TranslationRule::new(r"^> (.*)$", ElementKind::Quote),
        TranslationRule::new(r"^=>\s*(\S+)(\s+.*)?$", ElementKind::Link),
    ]
});

/// Translate one gemtext line. Never fails: unmatched lines become paragraphs.
pub fn translate(line: &str) -> Fragment<'_> {
    RULES
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or(Fragment::Paragraph(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_by_prefix_length() {
        assert_eq!(translate("# Title").to_string(), "<h1>Title</h1>");
        assert_eq!(translate("## Section").to_string(), "<h2>Section</h2>");
        assert_eq!(translate("### Sub").to_string(), "<h3>Sub</h3>");
        assert_eq!(translate("### x").kind(), ElementKind::Heading3);
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(translate("#nospace").kind(), ElementKind::Paragraph);
        assert_eq!(translate("#### four").kind(), ElementKind::Paragraph);
        assert_eq!(translate("# ").to_string(), "<h1></h1>");
    }

    #[test]
    fn test_link_label_is_left_trimmed() {
        let fragment = translate("=> gemini://example.org   Example   site");
        assert_eq!(
            fragment,
            Fragment::Link {
                target: "gemini://example.org",
                label: "Example   site"
            }
        );
    }

    #[test]
    fn test_link_without_space_after_arrow() {
        assert_eq!(
            translate("=>/about.gmi").to_string(),
            "<a href=\"/about.gmi\"></a><br>"
        );
    }

    #[test]
    fn test_bare_arrow_is_paragraph() {
        assert_eq!(translate("=>").kind(), ElementKind::Paragraph);
        assert_eq!(translate("=>   ").kind(), ElementKind::Paragraph);
    }

    #[test]
    fn test_content_is_not_escaped() {
        assert_eq!(translate("a < b & c").to_string(), "<p>a < b & c</p>");
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ElementKind::Quote.tag(), "blockquote");
        assert_eq!(ElementKind::Link.tag(), "a");
        assert_eq!(ElementKind::ListItem.to_string(), "list_item");
    }
}
