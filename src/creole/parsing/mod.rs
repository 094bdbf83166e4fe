//! The parsing engine: grammar-ordered matching, inline freezing, and
//! fragment building.

pub mod engine;

pub use engine::ParseRun;
