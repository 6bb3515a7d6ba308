//! Canonical writer: two-space indentation, one element per line, attributes
//! in insertion order. Elements holding only text are written inline.

use crate::element::{Element, Node};

const DECLARATION: &str = "<?xml version=\"1.0\"?>\n";

/// Writes `root` as a complete document with a leading declaration.
pub fn write_document(root: &Element) -> String {
    let mut out = String::from(DECLARATION);
    write_element(&mut out, root, 0);
    out
}

/// Writes `element` without a declaration or trailing newline.
pub fn write_fragment(element: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0);
    out.truncate(out.trim_end().len());
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    indent(out, depth);
    out.push('<');
    out.push_str(&element.tag);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value, true));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    if element
        .children
        .iter()
        .all(|child| matches!(child, Node::Text(_)))
    {
        out.push('>');
        out.push_str(&escape(&element.text(), false));
        close(out, &element.tag);
        return;
    }

    out.push_str(">\n");
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(out, child, depth + 1),
            Node::Text(text) => {
                indent(out, depth + 1);
                out.push_str(&escape(text.trim(), false));
                out.push('\n');
            }
            Node::Raw(markup) => {
                for line in markup.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    indent(out, depth + 1);
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }
    indent(out, depth);
    close(out, &element.tag);
}

fn close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
