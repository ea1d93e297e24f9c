//! Semantic actions: typed node constructors called by the grammar rules
//! as soon as each fragment has been parsed.

use sysl_ast::{
    Application, Attribute, Endpoint, Enumeration, Member, Method, NameMap, Primitive, Relation,
    ScopedRef, Span, Tuple, Type, TypeKind,
};
use sysl_lexer::{Token, TokenKind};

/// The declaration kinds selected by `!table`, `!type` and `!enum`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Table,
    Type,
    Enum,
}

impl DeclKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::TableMarker => Some(DeclKind::Table),
            TokenKind::TypeMarker => Some(DeclKind::Type),
            TokenKind::EnumMarker => Some(DeclKind::Enum),
            _ => None,
        }
    }
}

/// Where a name is being inserted, for logging overwrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Application,
    Member,
    Field,
    Attribute,
    EnumItem,
}

/// Insert into any named collection of the tree. Duplicate names replace
/// the earlier value.
pub fn merge<V>(map: &mut NameMap<V>, site: Site, name: impl Into<String>, value: V) {
    let name = name.into();
    if map.contains(&name) {
        tracing::debug!(?site, name = %name, "duplicate name, keeping the last definition");
    }
    map.merge(name, value);
}

pub fn application(
    name: &str,
    attrs: NameMap<Attribute>,
    members: NameMap<Member>,
    span: Span,
) -> Application {
    Application {
        name: name.to_string(),
        attrs,
        members,
        span,
    }
}

/// A table; the primary key is derived from the complete field list.
pub fn relation(fields: NameMap<Type>) -> TypeKind {
    let relation = Relation::new(fields);
    tracing::trace!(primary_key = ?relation.primary_key(), "built relation");
    TypeKind::Relation(relation)
}

pub fn tuple(fields: NameMap<Type>) -> TypeKind {
    TypeKind::Tuple(Tuple { fields })
}

pub fn enumeration(items: NameMap<i64>) -> TypeKind {
    TypeKind::Enum(Enumeration { items })
}

pub fn declared_type(kind: TypeKind, attrs: NameMap<Attribute>, span: Span) -> Type {
    Type {
        kind,
        optional: false,
        attrs,
        span,
    }
}

/// The type named by a single token after `<:`
pub fn type_ref(token: &Token<'_>) -> Option<TypeKind> {
    let kind = match token.kind {
        TokenKind::IntType => TypeKind::Primitive(Primitive::Int),
        TokenKind::DecimalType => TypeKind::Primitive(Primitive::Decimal),
        TokenKind::StringType => TypeKind::Primitive(Primitive::String),
        TokenKind::DateType => TypeKind::Primitive(Primitive::Date),
        TokenKind::ForeignKey => TypeKind::ForeignKey(ScopedRef::parse(token.text, token.span)),
        TokenKind::Identifier => TypeKind::TypeRef(ScopedRef::parse(token.text, token.span)),
        _ => return None,
    };
    Some(kind)
}

pub fn field(mut ty: Type, optional: bool, attrs: NameMap<Attribute>, span: Span) -> Type {
    ty.optional = optional;
    ty.attrs = attrs;
    ty.span = span;
    ty
}

pub fn flag(negated: bool) -> Attribute {
    Attribute::Flag { negated }
}

/// Attribute value from a string literal or a bare namespace
pub fn string_value(token: &Token<'_>) -> Attribute {
    match token.kind {
        TokenKind::String => Attribute::Str(unquote(token.text)),
        _ => Attribute::Str(token.text.to_string()),
    }
}

/// Strip the surrounding quotes and resolve `\"` and `\\` escapes.
fn unquote(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

pub fn method(kind: TokenKind) -> Option<Method> {
    match kind {
        TokenKind::Get => Some(Method::Get),
        TokenKind::Post => Some(Method::Post),
        TokenKind::Put => Some(Method::Put),
        TokenKind::Delete => Some(Method::Delete),
        _ => None,
    }
}

pub fn endpoint(path: &str, method: Method, attrs: NameMap<Attribute>, span: Span) -> Endpoint {
    Endpoint {
        name: path.strip_prefix('/').unwrap_or(path).to_string(),
        method,
        attrs,
        span,
    }
}
