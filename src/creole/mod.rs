//! Creole markup parsing.
//!
//! Module layout:
//!
//! - [`escape`]: the tilde escape character, the escaped-token predicate,
//!   and the final de-escaping pass.
//! - [`fragment`]: the output model (text runs and tagged nodes) plus the
//!   per-parse fragment store backing the placeholder mechanism.
//! - [`grammar`]: markup elements, ordered grammars, and the
//!   [`grammar::Dialect`] arena they live in.
//! - [`elements`]: the per-element matchers for inline spans, headings,
//!   lists, tables, links, images, macros, and preformatted blocks.
//! - [`parsing`]: the fragmentize engine that drives matching and
//!   building.
//! - [`dialects`]: ready-made grammar assemblies and their options.
//! - [`parser`]: the public entry point with preprocessing, parse
//!   contexts, and generate/render.
//! - [`building`]: xhtml rendering of fragment sequences.
//! - [`testing`]: helpers shared by the test suites.

pub mod building;
pub mod dialects;
pub mod elements;
pub mod escape;
pub mod fragment;
pub mod grammar;
pub mod parser;
pub mod parsing;
pub mod testing;
