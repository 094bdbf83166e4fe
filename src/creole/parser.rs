//! The public entry point: a dialect bound to a parse context.
//!
//! Parsing never fails; malformed markup renders as literal text. The
//! only way in is [`Parser::generate`] / [`Parser::render`] (and their
//! `_with` variants threading an environ value to macro callbacks).

use std::any::Any;

use crate::creole::building::render_fragments;
use crate::creole::fragment::Fragment;
use crate::creole::grammar::Dialect;
use crate::creole::parsing::ParseRun;

/// Which grammar the top-level text is parsed against.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Context {
    /// Whole documents: headings, lists, tables, paragraphs.
    #[default]
    Block,
    /// A single run of text: no block structure, no paragraph wrapper.
    Inline,
}

/// A dialect bound to a context, ready to parse documents.
pub struct Parser {
    dialect: Dialect,
    context: Context,
}

impl Parser {
    /// A block-context parser for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Parser {
            dialect,
            context: Context::Block,
        }
    }

    pub fn with_context(dialect: Dialect, context: Context) -> Self {
        Parser { dialect, context }
    }

    /// Parse `text` into fragments.
    pub fn generate(&self, text: &str) -> Vec<Fragment> {
        self.generate_with(text, &())
    }

    /// Parse `text`, passing `environ` through to macro callbacks.
    pub fn generate_with(&self, text: &str, environ: &dyn Any) -> Vec<Fragment> {
        let text = self.preprocess(text);
        let mut run = ParseRun::new(&self.dialect, environ);
        let grammar = match self.context {
            Context::Block => self.dialect.block_grammar(),
            Context::Inline => self.dialect.inline_grammar(),
        };
        run.fragmentize(&text, grammar)
    }

    /// Parse and serialize to xhtml.
    pub fn render(&self, text: &str) -> String {
        render_fragments(&self.generate(text))
    }

    pub fn render_with(&self, text: &str, environ: &dyn Any) -> String {
        render_fragments(&self.generate_with(text, environ))
    }

    /// Normalize line endings; block context also guarantees exactly one
    /// trailing newline, which the block matchers rely on.
    fn preprocess(&self, text: &str) -> String {
        let mut text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.context == Context::Block {
            let trimmed = text.trim_end().len();
            text.truncate(trimmed);
            text.push('\n');
        }
        text
    }
}
