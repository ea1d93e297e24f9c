//! Sysl Lexer - Tokenization using logos
//!
//! Unrecognized input never stops tokenizing: it is reported as a
//! [`LexError`] and scanning resumes at the next character.

mod token;

pub use token::*;

use logos::Logos;
use sysl_ast::{LineIndex, Position, Span};
use thiserror::Error;

/// A token with its text and location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized input '{text}'")]
    Unrecognized {
        text: String,
        span: Span,
        position: Position,
    },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span, position: Position },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::Unrecognized { span, .. } => *span,
            LexError::UnterminatedString { span, .. } => *span,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            LexError::Unrecognized { position, .. } => *position,
            LexError::UnterminatedString { position, .. } => *position,
        }
    }
}

/// Result of tokenizing one source buffer
#[derive(Debug, Clone)]
pub struct Lexed<'src> {
    /// Recognized tokens, always terminated by [`TokenKind::Eof`]
    pub tokens: Vec<Token<'src>>,
    pub errors: Vec<LexError>,
}

impl Lexed<'_> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenize a source string
pub fn tokenize(source: &str) -> Lexed<'_> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut bad: Vec<Span> = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: lexer.slice(),
                span,
                position: index.position(span.start),
            }),
            // Adjacent unrecognized characters are one error
            Err(()) => match bad.last_mut() {
                Some(last) if last.end == span.start => *last = last.merge(span),
                _ => bad.push(span),
            },
        }
    }

    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        span: Span::new(end, end),
        position: index.position(end),
    });

    let errors: Vec<LexError> = bad
        .into_iter()
        .map(|span| lex_error(source, span, index.position(span.start)))
        .collect();

    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "tokenized source");
    Lexed { tokens, errors }
}

fn lex_error(source: &str, span: Span, position: Position) -> LexError {
    let text = match source.get(span.start..span.end) {
        Some(text) => text.to_string(),
        None => String::from_utf8_lossy(&source.as_bytes()[span.start..span.end]).into_owned(),
    };
    if text.starts_with('"') {
        LexError::UnterminatedString { span, position }
    } else {
        LexError::Unrecognized {
            text,
            span,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_field_tokens() {
        assert_eq!(
            kinds("employeeId <: int [pk, ~autoinc]"),
            vec![
                TokenKind::SmallIdentifier,
                TokenKind::Subset,
                TokenKind::IntType,
                TokenKind::LBracket,
                TokenKind::SmallIdentifier,
                TokenKind::Comma,
                TokenKind::Tilde,
                TokenKind::SmallIdentifier,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_method_beats_identifier() {
        assert_eq!(kinds("GET"), vec![TokenKind::Get, TokenKind::Eof]);
        assert_eq!(kinds("DELETE"), vec![TokenKind::Delete, TokenKind::Eof]);
        assert_eq!(kinds("GETTER"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_primitive_beats_identifier_only_on_exact_text() {
        assert_eq!(kinds("date"), vec![TokenKind::DateType, TokenKind::Eof]);
        assert_eq!(kinds("dates"), vec![TokenKind::SmallIdentifier, TokenKind::Eof]);
        assert_eq!(kinds("integer"), vec![TokenKind::SmallIdentifier, TokenKind::Eof]);
    }

    #[test]
    fn test_identifier_shapes() {
        assert_eq!(kinds("Employee.employeeId"), vec![TokenKind::ForeignKey, TokenKind::Eof]);
        assert_eq!(kinds("io.sysl.demo"), vec![TokenKind::Namespace, TokenKind::Eof]);
        assert_eq!(kinds("Employee"), vec![TokenKind::Identifier, TokenKind::Eof]);
        assert_eq!(kinds("employee"), vec![TokenKind::SmallIdentifier, TokenKind::Eof]);
    }

    #[test]
    fn test_markers_and_paths() {
        assert_eq!(
            kinds("!table Pet: /pets/{id} PUT:"),
            vec![
                TokenKind::TableMarker,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Path,
                TokenKind::Put,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_survive_skipped_whitespace() {
        let lexed = tokenize("App:\n  # comment\n    !table T:");
        let marker = lexed.tokens[2];
        assert_eq!(marker.kind, TokenKind::TableMarker);
        assert_eq!(marker.text, "!table");
        assert_eq!(marker.position, Position::new(3, 5));
    }

    #[test]
    fn test_unrecognized_input_is_collected() {
        let lexed = tokenize("App: $$ !table T:");
        assert_eq!(lexed.errors.len(), 1);
        match &lexed.errors[0] {
            LexError::Unrecognized { text, position, .. } => {
                assert_eq!(text, "$$");
                assert_eq!(*position, Position::new(1, 6));
            }
            other => panic!("unexpected error {:?}", other),
        }
        // Scanning continued past the bad input
        assert!(lexed.tokens.iter().any(|t| t.kind == TokenKind::TableMarker));
    }

    #[test]
    fn test_separate_errors_stay_separate() {
        let lexed = tokenize("$ a %");
        assert_eq!(lexed.errors.len(), 2);
    }

    #[test]
    fn test_string_literal() {
        let lexed = tokenize(r#"package="io.sysl.demo""#);
        assert_eq!(lexed.tokens[2].kind, TokenKind::String);
        assert_eq!(lexed.tokens[2].text, r#""io.sysl.demo""#);
    }

    #[test]
    fn test_unterminated_string() {
        let lexed = tokenize("package=\"abc\n");
        assert!(matches!(
            lexed.errors.first(),
            Some(LexError::UnterminatedString { .. })
        ));
    }
}
