//! Serialization of fragment sequences to xhtml.
//!
//! Text fragments escape `&`, `<`, and `>`; attribute values also escape
//! double quotes. Markup fragments pass through verbatim, which is why
//! only macro callbacks may produce them.

use crate::creole::fragment::{Fragment, Node};

/// Tags serialized self-closed, with no content model.
const VOID_TAGS: [&str; 3] = ["br", "hr", "img"];

/// Render a fragment sequence as an xhtml string.
pub fn render_fragments(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        render_fragment(&mut out, fragment);
    }
    out
}

fn render_fragment(out: &mut String, fragment: &Fragment) {
    match fragment {
        Fragment::Text(text) => escape_text(out, text),
        Fragment::Markup(markup) => out.push_str(markup),
        Fragment::Node(node) => render_node(out, node),
    }
}

fn render_node(out: &mut String, node: &Node) {
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(out, value);
        out.push('"');
    }
    if VOID_TAGS.contains(&node.tag.as_str()) {
        out.push_str(" />");
        return;
    }
    out.push('>');
    for child in &node.children {
        render_fragment(out, child);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
