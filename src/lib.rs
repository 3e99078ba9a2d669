//! # DELPHI-DEPEND
//!
//! Unit dependency extraction for Delphi / Object Pascal source trees.
//!
//! Every `.pas` file under a root directory is stripped of comments, split into
//! its `interface` and `implementation` sections and searched for `uses`
//! clauses. Each referenced unit becomes a [`core::Dependency`] tagged with the
//! section that introduced it.
//!
//! ## Output Formats
//!
//! - **DOT**: Graphviz `digraph`, interface edges green, implementation edges red
//! - **JSON-Compact**: Minimal unit table plus index-based edge list
//!
//! The extraction is purely lexical. No compilation, symbol resolution or
//! validation of the referenced units takes place.

pub mod core;
pub mod formatters;
pub mod parsers;
