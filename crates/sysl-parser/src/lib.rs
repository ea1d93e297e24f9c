//! Sysl Parser - Recursive descent parser with semantic actions
//!
//! Parses Sysl model source into a [`Module`] tree. Lexical and syntax
//! errors are collected as [`Diagnostics`]; any diagnostic means the
//! parse failed, even when a partial tree exists.
//!
//! Key parsing challenges:
//! - `GET`, `int` and `Employee.employeeId` overlap with plain identifiers
//! - a table's primary key comes from `pk` flags on its fields

mod builder;
mod diagnostics;
mod error;
mod parser;
mod rule;

pub use builder::{merge, DeclKind, Site};
pub use diagnostics::*;
pub use error::*;
pub use parser::*;
pub use rule::*;

use sysl_ast::Module;
use sysl_lexer::tokenize;

/// A parse result together with every diagnostic recorded on the way
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    /// The (possibly partial) value; `None` when the start rule failed
    pub value: Option<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Parsed<T> {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// `Ok` only when no diagnostic was recorded
    pub fn into_result(self) -> Result<T, Diagnostics> {
        match self.value {
            Some(value) if self.diagnostics.is_empty() => Ok(value),
            _ => Err(self.diagnostics),
        }
    }
}

/// Parse a source string into a Module
pub fn parse(source: &str) -> Result<Module, Diagnostics> {
    parse_with_diagnostics(source).into_result()
}

/// Parse a source string, keeping the partial tree alongside diagnostics
pub fn parse_with_diagnostics(source: &str) -> Parsed<Module> {
    let parsed = parse_rule_with_diagnostics(source, Rule::Module);
    let value = parsed.value.and_then(|node| match node {
        Node::Module(module) => Some(module),
        _ => None,
    });
    Parsed {
        value,
        diagnostics: parsed.diagnostics,
    }
}

/// Parse a source string with `rule` as the start rule
pub fn parse_rule(source: &str, rule: Rule) -> Result<Node, Diagnostics> {
    parse_rule_with_diagnostics(source, rule).into_result()
}

pub fn parse_rule_with_diagnostics(source: &str, rule: Rule) -> Parsed<Node> {
    let lexed = tokenize(source);
    let mut diagnostics: Diagnostics = lexed.errors.iter().map(Diagnostic::lexical).collect();

    let mut parser = Parser::new(lexed.tokens);
    let value = parser.parse_rule(rule);
    diagnostics.extend(parser.into_diagnostics());

    tracing::debug!(%rule, diagnostics = diagnostics.len(), "parse finished");
    Parsed { value, diagnostics }
}
