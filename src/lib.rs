//! # creole-parser
//!
//! A recursive-descent parser for Creole wiki markup.
//!
//! The parser turns markup text into a tree of output fragments (tagged
//! nodes, text runs) that a serializer can walk. The built-in xhtml
//! renderer in [`creole::building`] covers the common case.
//!
//! Parsing is driven by a [`creole::grammar::Dialect`]: an ordered list of
//! markup elements assembled once and shared read-only across parses. Two
//! ready-made assemblies are provided, [`creole::dialects::creole10_base`]
//! (core Creole 1.0) and [`creole::dialects::creole11_base`] (the proposed
//! additions: monospace, super/subscript, underline, definition lists, and
//! macros).
//!
//! ```text
//! use creole_parser::creole::dialects::{creole11_base, DialectOptions};
//! use creole_parser::creole::parser::Parser;
//!
//! let parser = Parser::new(creole11_base(DialectOptions::default()));
//! let html = parser.render("Hello **world**");
//! // <p>Hello <strong>world</strong></p>
//! ```
//!
//! The test suites share the render helpers in [`creole::testing`].

#![allow(rustdoc::invalid_html_tags)]

pub mod creole;
