//! Output fragments and the per-parse fragment store.
//!
//! The parser produces a flat sequence of [`Fragment`]s per text span:
//! literal text runs, built [`Node`]s, and (from macro callbacks) raw
//! pre-rendered markup. Inline elements are "frozen" during parsing by
//! replacing their span in the working text with a `<<<id>>>` placeholder
//! whose node lives in the [`FragmentStore`]; the placeholders are
//! resolved back into fragments by [`fill_from_store`] once all grammar
//! elements have had their pass over the text.
//!
//! The store is a value scoped to one parse call. It is created by the
//! engine per invocation and never shared, so concurrent parses over one
//! dialect cannot observe each other's placeholders.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A piece of parser output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Fragment {
    /// A literal text run, escaped on serialization.
    Text(String),
    /// A built element node.
    Node(Node),
    /// Pre-rendered markup passed through verbatim on serialization.
    /// Only macro callbacks produce this.
    Markup(String),
}

/// A tagged output node with attributes and child fragments.
///
/// Attributes keep their insertion order; the renderer writes them as
/// given.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Fragment>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_children(mut self, children: Vec<Fragment>) -> Self {
        self.children = children;
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_children(vec![Fragment::Text(text.into())])
    }
}

/// Matches a placeholder spliced into working text by the engine.
static PLACE_HOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<<<(\d+)>>>").unwrap());

/// Placeholder ids start well above zero so that small numbers typed by
/// the user as literal `<<<n>>>` text stay unresolved and render as-is.
const FIRST_ID: u64 = 10_000_019;

/// Per-parse mapping from placeholder id to the fragments it stands for.
#[derive(Debug, Default)]
pub struct FragmentStore {
    entries: HashMap<u64, Vec<Fragment>>,
    next_id: u64,
}

impl FragmentStore {
    pub fn new() -> Self {
        FragmentStore {
            entries: HashMap::new(),
            next_id: FIRST_ID,
        }
    }

    /// Store `fragments` and return the placeholder id now standing for
    /// them. Ids are unique within one store.
    pub fn insert(&mut self, fragments: Vec<Fragment>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, fragments);
        id
    }

    /// Remove and return the fragments stored under `id`. Each
    /// placeholder occurs exactly once in the working text, so resolution
    /// consumes the entry.
    pub fn take(&mut self, id: u64) -> Option<Vec<Fragment>> {
        self.entries.remove(&id)
    }
}

/// Split literal text on placeholders, resolving each from the store.
///
/// A placeholder with no store entry renders literally; that only happens
/// when the user typed `<<<digits>>>` in the source.
pub fn fill_from_store(text: &str, store: &mut FragmentStore) -> Vec<Fragment> {
    let mut frags = Vec::new();
    let mut last = 0usize;
    for caps in PLACE_HOLDER.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            frags.push(Fragment::Text(text[last..whole.start()].to_string()));
        }
        let resolved = caps[1]
            .parse::<u64>()
            .ok()
            .and_then(|id| store.take(id));
        match resolved {
            Some(stored) => frags.extend(stored),
            None => frags.push(Fragment::Text(whole.as_str().to_string())),
        }
        last = whole.end();
    }
    if last < text.len() {
        frags.push(Fragment::Text(text[last..].to_string()));
    }
    frags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_round_trip() {
        let mut store = FragmentStore::new();
        let id = store.insert(vec![Fragment::Node(Node::new("em").with_text("hi"))]);
        let text = format!("before <<<{}>>> after", id);
        let frags = fill_from_store(&text, &mut store);
        assert_eq!(frags.len(), 3);
        assert_eq!(frags[0], Fragment::Text("before ".to_string()));
        assert!(matches!(&frags[1], Fragment::Node(n) if n.tag == "em"));
        assert_eq!(frags[2], Fragment::Text(" after".to_string()));
    }

    #[test]
    fn test_unresolved_placeholder_is_literal() {
        let mut store = FragmentStore::new();
        let frags = fill_from_store("a <<<23>>> b", &mut store);
        assert_eq!(
            frags,
            vec![
                Fragment::Text("a ".to_string()),
                Fragment::Text("<<<23>>>".to_string()),
                Fragment::Text(" b".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_numeric_placeholder_is_plain_text() {
        let mut store = FragmentStore::new();
        let frags = fill_from_store("<<<hi>>> and <<<>>>", &mut store);
        assert_eq!(frags, vec![Fragment::Text("<<<hi>>> and <<<>>>".to_string())]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = FragmentStore::new();
        let a = store.insert(vec![]);
        let b = store.insert(vec![]);
        assert_ne!(a, b);
    }
}
