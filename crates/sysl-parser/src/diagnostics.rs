//! Diagnostics collected during one parse attempt
//!
//! A parse attempt fails if and only if at least one diagnostic was
//! recorded, whether or not a tree was built.

use std::fmt;

use sysl_ast::Span;
use sysl_lexer::LexError;
use thiserror::Error;

use crate::{ParseError, Rule};

/// Which phase produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexical => f.write_str("LexicalError"),
            Stage::Syntax => f.write_str("SyntaxError"),
        }
    }
}

/// A recorded defect, displayed as `[line:column] Stage: message`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{line}:{column}] {stage}: {message}")]
pub struct Diagnostic {
    pub stage: Stage,
    /// Innermost grammar rule that failed; `None` for lexical errors
    pub rule: Option<Rule>,
    pub message: String,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn lexical(error: &LexError) -> Self {
        let position = error.position();
        Self {
            stage: Stage::Lexical,
            rule: None,
            message: error.to_string(),
            span: error.span(),
            line: position.line,
            column: position.column,
        }
    }

    pub fn syntax(error: &ParseError, rule: Option<Rule>) -> Self {
        let position = error.position();
        Self {
            stage: Stage::Syntax,
            rule,
            message: error.to_string(),
            span: error.span(),
            line: position.line,
            column: position.column,
        }
    }
}

/// Ordered diagnostics for one parse attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn has_stage(&self, stage: Stage) -> bool {
        self.items.iter().any(|d| d.stage == stage)
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use sysl_ast::Position;

    #[test]
    fn test_display_format() {
        let error = LexError::Unrecognized {
            text: "$".to_string(),
            span: Span::new(4, 5),
            position: Position::new(2, 3),
        };
        let diagnostic = Diagnostic::lexical(&error);
        assert_eq!(diagnostic.to_string(), "[2:3] LexicalError: unrecognized input '$'");
    }

    #[test]
    fn test_collection_keeps_order() {
        let first = Diagnostic::lexical(&LexError::UnterminatedString {
            span: Span::new(0, 1),
            position: Position::new(1, 1),
        });
        let second = Diagnostic::syntax(
            &ParseError::InvalidInteger {
                text: "99999999999999999999".to_string(),
                span: Span::new(5, 25),
                position: Position::new(1, 6),
            },
            Some(Rule::EnumItem),
        );
        let diagnostics: Diagnostics = vec![first, second].into_iter().collect();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.has_stage(Stage::Syntax));
        assert_eq!(
            diagnostics.to_string(),
            "[1:1] LexicalError: unterminated string literal\n\
             [1:6] SyntaxError: integer '99999999999999999999' is out of range"
        );
    }
}
