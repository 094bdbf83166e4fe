//! The fragmentize loop.
//!
//! One [`ParseRun`] serves one parse call: it owns the per-parse fragment
//! store and borrows the dialect and the caller's environ. The engine
//! walks a grammar in declared order; the first element with a match
//! handles its span and decides what happens to the rest of the text:
//!
//! - inline elements build their fragments, freeze them in the store, and
//!   splice a placeholder over their span; the same grammar position scans
//!   the patched text again,
//! - block elements recurse on the text before their span with the
//!   remaining grammar, emit their node, and loop on the text after it,
//! - macros returning markup splice it over their span for rescanning.
//!
//! When no element matches, the remaining text is a leaf: spent escapes
//! are dropped and placeholders are resolved back out of the store.

use std::any::Any;

use crate::creole::elements::{
    blocks::unescape_pre_fences,
    links::{resolve_interwiki, resolve_url, resolve_wiki, split_alias, ResolvedLink},
    ElementKind, Found, FoundData,
};
use crate::creole::escape::remove_escapes;
use crate::creole::fragment::{fill_from_store, Fragment, FragmentStore, Node};
use crate::creole::grammar::{Append, Dialect, ElementId, GrammarItem, MacroResult};

/// Tags a macro may return inside a fragment list and still have the
/// result treated as paragraph content at block level.
const INLINE_TAGS: [&str; 25] = [
    "a", "abbr", "acronym", "b", "big", "br", "cite", "code", "del", "dfn", "em", "i", "img",
    "ins", "kbd", "q", "samp", "small", "span", "strong", "sub", "sup", "tt", "u", "var",
];

fn all_nodes_inline(frags: &[Fragment]) -> bool {
    let mut saw_node = false;
    for frag in frags {
        if let Fragment::Node(node) = frag {
            saw_node = true;
            if !INLINE_TAGS.contains(&node.tag.as_str()) {
                return false;
            }
        }
    }
    saw_node
}

enum InlineBuilt {
    /// Freeze behind a placeholder.
    Frags(Vec<Fragment>),
    /// Markup from a macro: splice over the span and rescan.
    Splice(String),
}

enum BlockBuilt {
    /// Emit fragments, optionally followed by a newline.
    Frags(Vec<Fragment>, bool),
    /// Markup from a macro: splice over the span and rescan.
    Splice(String),
}

/// State of one parse call.
pub struct ParseRun<'a> {
    dialect: &'a Dialect,
    environ: &'a dyn Any,
    store: FragmentStore,
}

impl<'a> ParseRun<'a> {
    pub fn new(dialect: &'a Dialect, environ: &'a dyn Any) -> Self {
        ParseRun {
            dialect,
            environ,
            store: FragmentStore::new(),
        }
    }

    /// Parse `text` against a grammar and return its fragments.
    pub fn fragmentize(&mut self, text: &str, grammar: &[GrammarItem]) -> Vec<Fragment> {
        let mut frags = Vec::new();
        let mut text = text.to_string();
        let mut gi = 0usize;

        while !text.is_empty() {
            let matched = self.first_match(&text, &grammar[gi..]);
            let (offset, id, found) = match matched {
                Some((offset, id, found)) => (offset, id, found),
                None => {
                    let leaf = remove_escapes(&text);
                    frags.extend(fill_from_store(&leaf, &mut self.store));
                    break;
                }
            };
            gi += offset;
            let element = self.dialect.element(id);

            if element.is_inline() {
                match self.build_inline(id, &found, &text) {
                    InlineBuilt::Frags(built) => {
                        let ph = self.store.insert(built);
                        text = format!(
                            "{}<<<{}>>>{}",
                            &text[..found.start],
                            ph,
                            &text[found.end..]
                        );
                    }
                    InlineBuilt::Splice(markup) => {
                        text = format!(
                            "{}{}{}",
                            &text[..found.start],
                            markup,
                            &text[found.end..]
                        );
                    }
                }
                continue;
            }

            match self.build_block(id, &found, &text) {
                BlockBuilt::Frags(built, newline) => {
                    let leading = text[..found.start].to_string();
                    if !leading.is_empty() {
                        // The match was leftmost, so the matched item (and
                        // every member of its group) is done with the
                        // leading text.
                        frags.extend(self.fragmentize(&leading, &grammar[gi + 1..]));
                    }
                    let trailing = text[found.end..].to_string();
                    frags.extend(built);
                    let followed = !trailing.is_empty();
                    let emit_newline = match element.append {
                        Append::Always => newline,
                        Append::WhenFollowed => newline && followed,
                        Append::Never => false,
                    };
                    if emit_newline {
                        frags.push(Fragment::Text("\n".to_string()));
                    }
                    text = trailing;
                }
                BlockBuilt::Splice(markup) => {
                    text = format!(
                        "{}{}{}",
                        &text[..found.start],
                        markup,
                        &text[found.end..]
                    );
                }
            }
        }
        frags
    }

    /// First grammar item from the front of `grammar` with a match; in a
    /// group the leftmost match wins and declaration order breaks ties.
    fn first_match(&self, text: &str, grammar: &[GrammarItem]) -> Option<(usize, ElementId, Found)> {
        for (offset, item) in grammar.iter().enumerate() {
            match item {
                GrammarItem::Single(id) => {
                    if let Some(found) = self.dialect.element(*id).find(text) {
                        return Some((offset, *id, found));
                    }
                }
                GrammarItem::Group(ids) => {
                    let mut best: Option<(ElementId, Found)> = None;
                    for id in ids {
                        if let Some(found) = self.dialect.element(*id).find(text) {
                            match &best {
                                Some((_, b)) if b.start <= found.start => {}
                                _ => best = Some((*id, found)),
                            }
                        }
                    }
                    if let Some((id, found)) = best {
                        return Some((offset, id, found));
                    }
                }
            }
        }
        None
    }

    fn children(&mut self, id: ElementId, content: &str) -> Vec<Fragment> {
        let grammar = self.dialect.element(id).children.clone();
        self.fragmentize(content, &grammar)
    }

    fn build_inline(&mut self, id: ElementId, found: &Found, text: &str) -> InlineBuilt {
        let element = self.dialect.element(id);
        match &element.kind {
            ElementKind::Simple { .. } => {
                let (tag, start, end) = match found.data {
                    FoundData::Simple { tag, start, end } => (tag, start, end),
                    _ => unreachable!("simple matcher yields simple data"),
                };
                let children = self.children(id, &text[start..end]);
                InlineBuilt::Frags(vec![Fragment::Node(
                    Node::new(tag).with_children(children),
                )])
            }
            ElementKind::NoWiki => {
                let (start, end) = match found.data {
                    FoundData::Content { start, end } => (start, end),
                    _ => unreachable!("no-wiki matcher yields content data"),
                };
                // verbatim: no escape removal, placeholders still resolve
                let children = fill_from_store(&text[start..end], &mut self.store);
                InlineBuilt::Frags(vec![Fragment::Node(
                    Node::new(element.tag.clone()).with_children(children),
                )])
            }
            ElementKind::LineBreak { .. } => {
                InlineBuilt::Frags(vec![Fragment::Node(Node::new("br"))])
            }
            ElementKind::RawLink => {
                let (start, end, escaped) = match found.data {
                    FoundData::RawLink { start, end, escaped } => (start, end, escaped),
                    _ => unreachable!("raw-link matcher yields raw-link data"),
                };
                let url = &text[start..end];
                if escaped {
                    InlineBuilt::Frags(vec![Fragment::Text(url.to_string())])
                } else {
                    InlineBuilt::Frags(vec![Fragment::Node(
                        Node::new("a").with_attr("href", url).with_text(url),
                    )])
                }
            }
            ElementKind::Link { types } => {
                let (start, end) = match found.data {
                    FoundData::Content { start, end } => (start, end),
                    _ => unreachable!("link matcher yields content data"),
                };
                let body = text[start..end].to_string();
                let types = types.clone();
                self.build_link(id, &body, &types, &text[found.start..found.end])
            }
            ElementKind::Image => {
                let (start, end) = match found.data {
                    FoundData::Content { start, end } => (start, end),
                    _ => unreachable!("image matcher yields content data"),
                };
                let body = &text[start..end];
                let (target, alias) = split_alias(body);
                let src = target.trim();
                if src.is_empty() || src.chars().any(char::is_whitespace) {
                    return InlineBuilt::Frags(vec![Fragment::Node(
                        Node::new("span").with_text("Bad Image src"),
                    )]);
                }
                let alt = alias.map(str::trim).unwrap_or(src);
                let node = if (self.dialect.check_uri)(src) {
                    Node::new("img").with_attr("src", src).with_attr("alt", alt)
                } else {
                    Node::new("img")
                        .with_attr("src", "unsafe_uri_detected")
                        .with_attr("alt", "unsafe_uri_detected")
                };
                InlineBuilt::Frags(vec![Fragment::Node(node)])
            }
            ElementKind::Macro { .. } | ElementKind::BodiedMacro { .. } => {
                let (name, arg, body) = match &found.data {
                    FoundData::Macro { name, arg, body } => {
                        (name.clone(), arg.clone(), body.clone())
                    }
                    _ => unreachable!("macro matcher yields macro data"),
                };
                let raw = &text[found.start..found.end];
                match self.call_macro(&name, &arg, body.as_deref(), false) {
                    Some(MacroResult::Text(markup)) => InlineBuilt::Splice(markup),
                    Some(MacroResult::Fragments(frags)) => InlineBuilt::Frags(frags),
                    None => InlineBuilt::Frags(vec![Fragment::Node(
                        Node::new("code")
                            .with_attr("class", "unknown_macro")
                            .with_text(raw),
                    )]),
                }
            }
            _ => unreachable!("block element on the inline path"),
        }
    }

    fn build_link(
        &mut self,
        id: ElementId,
        body: &str,
        types: &[ElementId],
        raw: &str,
    ) -> InlineBuilt {
        let (target, alias) = split_alias(body);
        let resolved = types.iter().find_map(|tid| {
            match &self.dialect.element(*tid).kind {
                ElementKind::UrlLink => resolve_url(target, &self.dialect.check_uri),
                ElementKind::InterWikiLink(cfg) => resolve_interwiki(cfg, target),
                ElementKind::WikiLink(cfg) => resolve_wiki(cfg, target),
                _ => None,
            }
        });
        let ResolvedLink { href, alias: default_alias, class } = match resolved {
            Some(resolved) => resolved,
            None => return InlineBuilt::Frags(vec![Fragment::Text(raw.to_string())]),
        };
        let href = match href {
            Some(href) => href,
            None => return InlineBuilt::Frags(vec![Fragment::Text(raw.to_string())]),
        };
        let mut node = Node::new("a");
        if let Some(class) = class {
            node = node.with_attr("class", class);
        }
        node = node.with_attr("href", href);
        let children = match alias {
            Some(alias) => self.children(id, alias.trim()),
            None => vec![Fragment::Text(default_alias)],
        };
        InlineBuilt::Frags(vec![Fragment::Node(node.with_children(children))])
    }

    fn build_block(&mut self, id: ElementId, found: &Found, text: &str) -> BlockBuilt {
        let element = self.dialect.element(id);
        let tag = element.tag.clone();
        match &element.kind {
            ElementKind::BlankLine => BlockBuilt::Frags(Vec::new(), false),
            ElementKind::Lone => {
                BlockBuilt::Frags(vec![Fragment::Node(Node::new(tag))], true)
            }
            ElementKind::Heading => {
                let (level, start, end) = match found.data {
                    FoundData::Heading { level, start, end } => (level, start, end),
                    _ => unreachable!("heading matcher yields heading data"),
                };
                let children = self.children(id, &text[start..end]);
                BlockBuilt::Frags(
                    vec![Fragment::Node(
                        Node::new(format!("h{}", level)).with_children(children),
                    )],
                    true,
                )
            }
            ElementKind::PreBlock => {
                let (start, end) = match found.data {
                    FoundData::Content { start, end } => (start, end),
                    _ => unreachable!("pre matcher yields content data"),
                };
                let content = unescape_pre_fences(&text[start..end]);
                BlockBuilt::Frags(
                    vec![Fragment::Node(Node::new(tag).with_text(content))],
                    true,
                )
            }
            ElementKind::Paragraph
            | ElementKind::List { .. }
            | ElementKind::ListItem
            | ElementKind::NestedList { .. }
            | ElementKind::DefinitionTerm
            | ElementKind::DefinitionDef
            | ElementKind::Table
            | ElementKind::TableRow
            | ElementKind::TableCell { .. } => {
                let (start, end) = match found.data {
                    FoundData::Content { start, end } => (start, end),
                    _ => unreachable!("content matcher yields content data"),
                };
                let children = self.children(id, &text[start..end]);
                BlockBuilt::Frags(
                    vec![Fragment::Node(Node::new(tag).with_children(children))],
                    true,
                )
            }
            ElementKind::Macro { .. } | ElementKind::BodiedMacro { .. } => {
                let (name, arg, body) = match &found.data {
                    FoundData::Macro { name, arg, body } => {
                        (name.clone(), arg.clone(), body.clone())
                    }
                    _ => unreachable!("macro matcher yields macro data"),
                };
                let raw = &text[found.start..found.end];
                match self.call_macro(&name, &arg, body.as_deref(), true) {
                    Some(MacroResult::Text(markup)) => BlockBuilt::Splice(markup),
                    Some(MacroResult::Fragments(frags)) => {
                        if all_nodes_inline(&frags) {
                            BlockBuilt::Frags(
                                vec![Fragment::Node(Node::new("p").with_children(frags))],
                                true,
                            )
                        } else {
                            BlockBuilt::Frags(frags, false)
                        }
                    }
                    None => BlockBuilt::Frags(
                        vec![Fragment::Node(
                            Node::new("pre")
                                .with_attr("class", "unknown_macro")
                                .with_text(raw),
                        )],
                        true,
                    ),
                }
            }
            _ => unreachable!("inline element on the block path"),
        }
    }

    fn call_macro(
        &self,
        name: &str,
        arg: &str,
        body: Option<&str>,
        is_block: bool,
    ) -> Option<MacroResult> {
        let func = self.dialect.macro_func.as_ref()?;
        func(name, arg, body, is_block, self.environ)
    }
}
