//! Parser error types

use sysl_ast::{Position, Span};
use sysl_lexer::{Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
        position: Position,
    },

    /// None of the alternatives of an ordered choice matched
    #[error("expected {expected}, found {found}")]
    NoViableAlternative {
        expected: String,
        found: String,
        span: Span,
        position: Position,
    },

    #[error("integer '{text}' is out of range")]
    InvalidInteger {
        text: String,
        span: Span,
        position: Position,
    },

    #[error("unexpected {found} after complete {rule}")]
    TrailingInput {
        rule: String,
        found: String,
        span: Span,
        position: Position,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::NoViableAlternative { span, .. } => *span,
            ParseError::InvalidInteger { span, .. } => *span,
            ParseError::TrailingInput { span, .. } => *span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::UnexpectedToken { position, .. } => *position,
            ParseError::NoViableAlternative { position, .. } => *position,
            ParseError::InvalidInteger { position, .. } => *position,
            ParseError::TrailingInput { position, .. } => *position,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: &Token<'_>) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: describe_found(found),
            span: found.span,
            position: found.position,
        }
    }

    pub fn no_viable(expected: impl Into<String>, found: &Token<'_>) -> Self {
        ParseError::NoViableAlternative {
            expected: expected.into(),
            found: describe_found(found),
            span: found.span,
            position: found.position,
        }
    }

    pub fn invalid_integer(token: &Token<'_>) -> Self {
        ParseError::InvalidInteger {
            text: token.text.to_string(),
            span: token.span,
            position: token.position,
        }
    }

    pub fn trailing(rule: impl Into<String>, found: &Token<'_>) -> Self {
        ParseError::TrailingInput {
            rule: rule.into(),
            found: describe_found(found),
            span: found.span,
            position: found.position,
        }
    }
}

/// `identifier 'Foo'`, `':'` or `end of file`
fn describe_found(token: &Token<'_>) -> String {
    let described = token.kind.describe();
    if token.kind == TokenKind::Eof || described.starts_with('\'') {
        described.to_string()
    } else {
        format!("{} '{}'", described, token.text)
    }
}
