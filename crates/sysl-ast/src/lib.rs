//! Sysl AST - Core types for the abstract syntax tree
//!
//! This crate defines the model tree produced by the parser, spans and
//! line/column positions for source locations, and the canonical printer.

mod span;
mod names;
mod types;
mod decl;
mod printer;

pub use span::*;
pub use names::*;
pub use types::*;
pub use decl::*;
pub use printer::*;

use serde::{Deserialize, Serialize};

/// A complete parsed model: every application in the source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Module {
    pub apps: NameMap<Application>,
    pub span: Span,
}
