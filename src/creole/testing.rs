//! Helpers shared by the test suites.
//!
//! Most tests render a snippet through a default dialect and compare
//! strings; the helpers here keep those one-liners short. Nothing in this
//! module is used outside of tests.

use crate::creole::dialects::{creole10_base, creole11_base, DialectOptions};
use crate::creole::parser::Parser;

/// Render with the creole 1.1 additions and default options.
pub fn render11(text: &str) -> String {
    Parser::new(creole11_base(DialectOptions::default())).render(text)
}

/// Render with the plain creole 1.0 grammar, monospace no-wiki.
pub fn render10(text: &str) -> String {
    let options = DialectOptions {
        no_wiki_monospace: true,
        ..DialectOptions::default()
    };
    Parser::new(creole10_base(options)).render(text)
}

/// Wrap the expected inline rendering in the paragraph the block context
/// adds around bare text.
pub fn wrap_p(inner: &str) -> String {
    format!("<p>{}</p>\n", inner)
}
