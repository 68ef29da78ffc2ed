//! Integration tests for line translation

use gmi2html::{translate, ElementKind, Fragment};

#[test]
fn test_longest_heading_prefix_wins() {
    for (line, expected) in [
        ("# one", "<h1>one</h1>"),
        ("## two", "<h2>two</h2>"),
        ("### three", "<h3>three</h3>"),
    ] {
        assert_eq!(translate(line).to_string(), expected, "line {:?}", line);
    }

    let deep = translate("### x");
    assert_ne!(deep.kind(), ElementKind::Heading1);
    assert_ne!(deep.kind(), ElementKind::Heading2);
}

#[test]
fn test_heading_text_keeps_inner_hashes() {
    assert_eq!(translate("# C# and F#").to_string(), "<h1>C# and F#</h1>");
    assert_eq!(translate("##  spaced").to_string(), "<h2> spaced</h2>");
}

#[test]
fn test_list_item_and_quote() {
    assert_eq!(translate("* milk").to_string(), "<li>milk</li>");
    assert_eq!(translate("> said").to_string(), "<blockquote>said</blockquote>");
    assert_eq!(translate("*bold*").kind(), ElementKind::Paragraph);
    assert_eq!(translate(">no space").kind(), ElementKind::Paragraph);
}

#[test]
fn test_link_with_label() {
    assert_eq!(
        translate("=> target   label text").to_string(),
        "<a href=\"target\">label text</a><br>"
    );
}

#[test]
fn test_link_without_label() {
    assert_eq!(
        translate("=> gemini://example.org/").to_string(),
        "<a href=\"gemini://example.org/\"></a><br>"
    );
    assert_eq!(
        translate("=> /next   "),
        Fragment::Link {
            target: "/next",
            label: ""
        }
    );
}

#[test]
fn test_link_label_keeps_leading_tab() {
    // only spaces are trimmed from the label
    assert_eq!(
        translate("=> /x\tTabbed"),
        Fragment::Link {
            target: "/x",
            label: "\tTabbed"
        }
    );
}

#[test]
fn test_paragraph_is_unmodified() {
    let line = "  indented <b>text</b> => not a link";
    assert_eq!(translate(line), Fragment::Paragraph(line));
    assert_eq!(translate(line).to_string(), format!("<p>{}</p>", line));
}
