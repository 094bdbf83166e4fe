//! Markup elements, grammars, and the dialect arena.
//!
//! A [`Dialect`] owns every markup element of one wiki flavour in an
//! arena; elements refer to each other by [`ElementId`], which is how
//! mutually recursive child grammars (strong inside emphasis inside
//! strong) are expressed without cyclic ownership. Construction is
//! two-phase through [`DialectBuilder`]: all elements are added first,
//! then their child grammars are patched in, then the builder is sealed
//! into an immutable `Dialect` that can be shared read-only across
//! threads.
//!
//! A grammar is an ordered list of [`GrammarItem`]s. Order is priority:
//! elements later in the list need no knowledge of those before them,
//! because earlier elements have already consumed their spans. Items that
//! must be tried simultaneously (their syntaxes can nest in either order)
//! share a [`GrammarItem::Group`], where the leftmost match wins and ties
//! go to the first-declared member.

use std::any::Any;

use crate::creole::elements::ElementKind;
use crate::creole::fragment::Fragment;

/// Index of an element in its dialect's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElementId(pub(crate) usize);

/// One priority slot of a grammar.
#[derive(Clone, Debug)]
pub enum GrammarItem {
    Single(ElementId),
    /// Simultaneous alternatives: leftmost match wins, declaration order
    /// breaks ties.
    Group(Vec<ElementId>),
}

/// Whether a newline is appended after a built block node. Cosmetic only;
/// it keeps the serialized output readable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Append {
    Always,
    /// Only when more text follows the match (list items).
    WhenFollowed,
    Never,
}

/// One markup element: its matcher variant, output tag, child grammar,
/// and newline policy.
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) tag: String,
    pub(crate) children: Vec<GrammarItem>,
    pub(crate) append: Append,
}

/// What a macro callback may hand back to the parser.
pub enum MacroResult {
    /// Wiki markup to splice into the working text and parse again.
    Text(String),
    /// Ready-made fragments spliced into the output as-is.
    Fragments(Vec<Fragment>),
}

/// Macro callback: `(name, arg_string, body, is_block, environ)`.
///
/// `body` is `None` for macros without a body. `environ` is the opaque
/// value given to the top-level parse call, passed through unchanged.
/// Returning `None` marks the macro unknown and triggers the literal
/// fallback rendering.
pub type MacroFunc =
    Box<dyn Fn(&str, &str, Option<&str>, bool, &dyn Any) -> Option<MacroResult> + Send + Sync>;

/// URI safety check used by links and images; `true` means safe to emit.
pub type UriCheckFunc = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Maps a wiki page name (spaces already replaced) to a path component.
pub type PageFunc = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Maps a wiki page name to an optional class attribute for its link.
pub type ClassFunc = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// An immutable, shareable grammar assembly.
///
/// Dialects hold no per-parse state; the engine threads its own store
/// through each call, so one dialect can serve concurrent parses.
pub struct Dialect {
    elements: Vec<Element>,
    block: Vec<GrammarItem>,
    inline: Vec<GrammarItem>,
    pub(crate) macro_func: Option<MacroFunc>,
    pub(crate) check_uri: UriCheckFunc,
}

impl Dialect {
    pub(crate) fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// The top-level grammar for block context parsing.
    pub fn block_grammar(&self) -> &[GrammarItem] {
        &self.block
    }

    /// The grammar for inline context parsing (also the child grammar of
    /// paragraphs and headings).
    pub fn inline_grammar(&self) -> &[GrammarItem] {
        &self.inline
    }
}

/// Two-phase dialect construction.
///
/// Phase one adds elements and records their ids; phase two patches child
/// grammars (which may refer to any id, including forward and mutual
/// references); `build` seals the result.
pub struct DialectBuilder {
    elements: Vec<Element>,
}

impl DialectBuilder {
    pub fn new() -> Self {
        DialectBuilder { elements: Vec::new() }
    }

    pub fn add(&mut self, kind: ElementKind, tag: &str, append: Append) -> ElementId {
        self.elements.push(Element {
            kind,
            tag: tag.to_string(),
            children: Vec::new(),
            append,
        });
        ElementId(self.elements.len() - 1)
    }

    pub fn set_children(&mut self, id: ElementId, children: Vec<GrammarItem>) {
        self.elements[id.0].children = children;
    }

    /// Patch the ordered link-type sub-grammar of a bracketed-link
    /// element.
    pub fn set_link_types(&mut self, id: ElementId, types: Vec<ElementId>) {
        match &mut self.elements[id.0].kind {
            ElementKind::Link { types: slot } => *slot = types,
            _ => panic!("set_link_types on a non-link element"),
        }
    }

    pub fn build(
        self,
        block: Vec<GrammarItem>,
        inline: Vec<GrammarItem>,
        macro_func: Option<MacroFunc>,
        check_uri: UriCheckFunc,
    ) -> Dialect {
        Dialect {
            elements: self.elements,
            block,
            inline,
            macro_func,
            check_uri,
        }
    }
}

impl Default for DialectBuilder {
    fn default() -> Self {
        Self::new()
    }
}
