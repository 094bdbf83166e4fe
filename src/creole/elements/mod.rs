//! The markup element family.
//!
//! Every syntactic construct the parser knows is one [`ElementKind`]
//! variant. A kind bundles the configuration its matcher needs; the
//! matcher itself is a pure function from text to an optional [`Found`]
//! span, dispatched through [`Element::find`]. Builders live in the
//! parsing engine, which turns a `Found` into output fragments using the
//! element's child grammar.
//!
//! Matchers must consume the entire span of their construct including
//! delimiters; block-level matchers also consume the trailing newline.
//! Tokens preceded by an unescaped tilde are never recognized (see
//! [`crate::creole::escape`]).

pub mod blocks;
pub mod inline;
pub mod links;
pub mod lists;
pub mod macros;
pub mod tables;

use crate::creole::grammar::{Element, ElementId};

pub use links::{InterWikiConfig, WikiLinkConfig};

/// The closed set of markup element variants.
pub enum ElementKind {
    /// Symmetric-token inline spans; one element matches every entry of
    /// the token table (strong, em, sub, sup, underline, monospace).
    Simple {
        tokens: Vec<(&'static str, &'static str)>,
    },
    /// Inline `{{{...}}}`, content kept verbatim.
    NoWiki,
    /// Inline `\\`; with `blog_style` every bare newline breaks too.
    LineBreak { blog_style: bool },
    /// Bare `http(s)://` / `ftp://` URLs in running text.
    RawLink,
    /// Bracketed `[[target|alias]]` links; `types` is the ordered
    /// link-type sub-grammar the target is dispatched to.
    Link { types: Vec<ElementId> },
    /// Link type: explicit URI scheme.
    UrlLink,
    /// Link type: `wiki:Page Name`.
    InterWikiLink(InterWikiConfig),
    /// Link type: bare page name.
    WikiLink(WikiLinkConfig),
    /// `{{src|alt}}` images.
    Image,
    /// `<<name args>>` macros; block variants stand alone on a line.
    Macro { block: bool },
    /// `<<name>>body<</name>>` macros with balanced same-name nesting.
    BodiedMacro { block: bool },
    /// `=` through `======` headings.
    Heading,
    /// Whatever is left at block level.
    Paragraph,
    /// `{{{` / `}}}` block, content kept verbatim.
    PreBlock,
    /// `----` on a line of its own.
    Lone,
    /// One or more blank lines; separates blocks, builds nothing.
    BlankLine,
    /// A run of list lines (`*` unordered, `#` ordered, `;` definition).
    /// `stops` are the single-token line starts that end the run.
    List {
        token: char,
        stops: &'static str,
    },
    /// One item of a list, up to the next same-level marker.
    ListItem,
    /// A deeper list starting on a line inside the current item.
    NestedList { token: char },
    /// `;` definition term.
    DefinitionTerm,
    /// `:` definition body.
    DefinitionDef,
    /// A run of `|` lines.
    Table,
    /// One `|`-delimited line of a table.
    TableRow,
    /// One cell; `header` selects the `|=` token.
    TableCell { header: bool },
}

/// A located element occurrence. `start..end` is the full consumed span.
pub(crate) struct Found {
    pub start: usize,
    pub end: usize,
    pub data: FoundData,
}

/// Capture data the builder needs, beyond the span itself. Ranges are
/// byte offsets into the text the matcher scanned.
pub(crate) enum FoundData {
    /// No captures; the element builds from its kind alone.
    Plain,
    /// The content range of the match.
    Content { start: usize, end: usize },
    /// A simple inline span with its resolved output tag.
    Simple {
        tag: &'static str,
        start: usize,
        end: usize,
    },
    Heading {
        level: u8,
        start: usize,
        end: usize,
    },
    RawLink {
        start: usize,
        end: usize,
        escaped: bool,
    },
    Macro {
        name: String,
        arg: String,
        body: Option<String>,
    },
}

impl Element {
    /// Search `text` for the first occurrence of this element.
    pub(crate) fn find(&self, text: &str) -> Option<Found> {
        match &self.kind {
            ElementKind::Simple { tokens } => inline::find_simple(tokens, text),
            ElementKind::NoWiki => inline::find_no_wiki(text),
            ElementKind::LineBreak { blog_style } => inline::find_line_break(text, *blog_style),
            ElementKind::RawLink => links::find_raw_link(text),
            ElementKind::Link { .. } => links::find_link(text),
            ElementKind::Image => links::find_image(text),
            ElementKind::Macro { block } => macros::find_macro(text, *block),
            ElementKind::BodiedMacro { block } => macros::find_bodied_macro(text, *block),
            ElementKind::Heading => blocks::find_heading(text),
            ElementKind::Paragraph => blocks::find_paragraph(text),
            ElementKind::PreBlock => blocks::find_pre_block(text),
            ElementKind::Lone => blocks::find_lone(text),
            ElementKind::BlankLine => blocks::find_blank_line(text),
            ElementKind::List { token, stops } => lists::find_list(*token, stops, text),
            ElementKind::ListItem => lists::find_list_item(text),
            ElementKind::NestedList { token } => lists::find_nested_list(*token, text),
            ElementKind::DefinitionTerm => lists::find_definition_term(text),
            ElementKind::DefinitionDef => lists::find_definition_def(text),
            ElementKind::Table => tables::find_table(text),
            ElementKind::TableRow => tables::find_table_row(text),
            ElementKind::TableCell { header } => tables::find_table_cell(text, *header),
            // Link types are only consulted through the link dispatch,
            // never searched as grammar items.
            ElementKind::UrlLink
            | ElementKind::InterWikiLink(_)
            | ElementKind::WikiLink(_) => None,
        }
    }

    /// Inline elements are frozen behind placeholders; block elements are
    /// spliced directly.
    pub(crate) fn is_inline(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Simple { .. }
                | ElementKind::NoWiki
                | ElementKind::LineBreak { .. }
                | ElementKind::RawLink
                | ElementKind::Link { .. }
                | ElementKind::Image
                | ElementKind::Macro { block: false }
                | ElementKind::BodiedMacro { block: false }
        )
    }
}

/// First unescaped occurrence of `token` in `text` at or after `from`.
pub(crate) fn find_unescaped(text: &str, token: &str, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(rel) = text[at..].find(token) {
        let pos = at + rel;
        if !crate::creole::escape::is_escaped(text, pos) {
            return Some(pos);
        }
        at = pos + 1;
    }
    None
}
