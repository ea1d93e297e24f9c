//! Token definitions for Sysl models
//!
//! Several patterns overlap on the same text. They are resolved by longest
//! match first, then by this fixed priority list (highest first):
//!
//! 1. declaration markers: `!table`, `!type`, `!enum`
//! 2. HTTP methods: `GET`, `POST`, `PUT`, `DELETE`
//! 3. primitive type names: `int`, `decimal`, `string`, `date`
//! 4. foreign-key reference: `Employee.employeeId`
//! 5. qualified namespace: `io.sysl.demo`
//! 6. generic identifiers: `Employee`, `employeeId`
//!
//! Reordering this list changes what programs mean: `GET` must never come
//! out as an identifier, while `GETTER` and `integer` must.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip line comments
pub enum TokenKind {
    // === Declaration markers ===
    #[token("!table", priority = 60)]
    TableMarker,
    #[token("!type", priority = 60)]
    TypeMarker,
    #[token("!enum", priority = 60)]
    EnumMarker,

    // === HTTP methods ===
    #[token("GET", priority = 50)]
    Get,
    #[token("POST", priority = 50)]
    Post,
    #[token("PUT", priority = 50)]
    Put,
    #[token("DELETE", priority = 50)]
    Delete,

    // === Primitive types ===
    #[token("int", priority = 40)]
    IntType,
    #[token("decimal", priority = 40)]
    DecimalType,
    #[token("string", priority = 40)]
    StringType,
    #[token("date", priority = 40)]
    DateType,

    // === Identifier shapes ===
    #[regex(r"[A-Z][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)+", priority = 30)]
    ForeignKey,
    #[regex(r"[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)+", priority = 20)]
    Namespace,
    #[regex(r"[A-Z][A-Za-z0-9_]*", priority = 1)]
    Identifier,
    #[regex(r"[a-z][A-Za-z0-9_]*", priority = 1)]
    SmallIdentifier,

    // === Literals ===
    #[regex(r"/[A-Za-z0-9_\-{}./]*")]
    Path,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r"-?[0-9]+")]
    Integer,

    // === Punctuation ===
    #[token("<:")]
    Subset,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("?")]
    Question,
    #[token("~")]
    Tilde,

    // === Special ===
    Eof,
}

impl TokenKind {
    pub fn is_decl_marker(&self) -> bool {
        matches!(
            self,
            TokenKind::TableMarker | TokenKind::TypeMarker | TokenKind::EnumMarker
        )
    }

    pub fn is_method(&self) -> bool {
        matches!(
            self,
            TokenKind::Get | TokenKind::Post | TokenKind::Put | TokenKind::Delete
        )
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            TokenKind::IntType | TokenKind::DecimalType | TokenKind::StringType | TokenKind::DateType
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::TableMarker => "'!table'",
            TokenKind::TypeMarker => "'!type'",
            TokenKind::EnumMarker => "'!enum'",
            TokenKind::Get => "'GET'",
            TokenKind::Post => "'POST'",
            TokenKind::Put => "'PUT'",
            TokenKind::Delete => "'DELETE'",
            TokenKind::IntType => "'int'",
            TokenKind::DecimalType => "'decimal'",
            TokenKind::StringType => "'string'",
            TokenKind::DateType => "'date'",
            TokenKind::ForeignKey => "foreign key reference",
            TokenKind::Namespace => "namespace",
            TokenKind::Identifier => "identifier",
            TokenKind::SmallIdentifier => "lowercase identifier",
            TokenKind::Path => "path",
            TokenKind::String => "string literal",
            TokenKind::Integer => "integer",
            TokenKind::Subset => "'<:'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Equals => "'='",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Question => "'?'",
            TokenKind::Tilde => "'~'",
            TokenKind::Eof => "end of file",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
