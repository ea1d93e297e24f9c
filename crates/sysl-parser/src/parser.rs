//! Recursive descent parser implementation
//!
//! One method per grammar rule. Each rule consumes the tokens it matches
//! and hands the finished fragment to [`crate::builder`]. On failure a
//! rule returns a [`ParseError`] without consuming past the offending token.

use sysl_ast::{Application, Attribute, Endpoint, Member, Module, NameMap, Position, Span, Type};
use sysl_lexer::{Token, TokenKind};

use crate::builder::{self, DeclKind, Site};
use crate::{Diagnostic, Diagnostics, Node, ParseError, Rule};

pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
    diagnostics: Diagnostics,
    /// Innermost rule of the error currently propagating
    failed_rule: Option<Rule>,
}

impl<'src> Parser<'src> {
    /// `tokens` must end with an `Eof` token, as produced by `tokenize`.
    pub fn new(mut tokens: Vec<Token<'src>>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            let position = tokens.last().map(|t| t.position).unwrap_or(Position::new(1, 1));
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: "",
                span: Span::new(end, end),
                position,
            });
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
            failed_rule: None,
        }
    }

    /// Syntax diagnostics recorded so far
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    // === Utilities ===

    fn current(&self) -> Token<'src> {
        // `new` guarantees a trailing Eof and `advance` never moves past it
        self.tokens[self.pos]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    /// Consume the current token if it is `kind`
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(kind.describe(), &self.current()))
        }
    }

    fn span(&self) -> Span {
        self.current().span
    }

    /// From `start` to the end of the last consumed token
    fn span_from(&self, start: Span) -> Span {
        let end = match self.pos {
            0 => start.end,
            pos => self.tokens[pos - 1].span.end.max(start.start),
        };
        Span::new(start.start, end)
    }

    /// Run a rule body, remembering the innermost rule that fails.
    fn enter<T>(
        &mut self,
        rule: Rule,
        body: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        tracing::trace!(%rule, pos = self.pos, "enter rule");
        let result = body(self);
        if result.is_err() && self.failed_rule.is_none() {
            self.failed_rule = Some(rule);
        }
        result
    }

    fn report(&mut self, error: ParseError) {
        let rule = self.failed_rule.take();
        tracing::debug!(rule = ?rule, %error, "syntax error");
        self.diagnostics.push(Diagnostic::syntax(&error, rule));
    }

    /// `[ ... ]` when present, otherwise empty
    fn optional_attributes(&mut self) -> Result<NameMap<Attribute>, ParseError> {
        if self.at(TokenKind::LBracket) {
            self.parse_attributes()
        } else {
            Ok(NameMap::new())
        }
    }

    /// `'[' (item (',' item)*)? ']'` with no trailing comma
    fn bracketed_list(
        &mut self,
        site: Site,
        mut item: impl FnMut(&mut Self) -> Result<(String, Attribute), ParseError>,
    ) -> Result<NameMap<Attribute>, ParseError> {
        self.consume(TokenKind::LBracket)?;
        let mut attrs = NameMap::new();
        if !self.at(TokenKind::RBracket) {
            loop {
                let (key, value) = item(self)?;
                builder::merge(&mut attrs, site, key, value);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RBracket)?;
        Ok(attrs)
    }

    // === Entry points ===

    /// Parse the whole input with `rule` as the start rule. The rule must
    /// consume every token. Errors are recorded, never returned.
    pub fn parse_rule(&mut self, rule: Rule) -> Option<Node> {
        let result = match rule {
            Rule::Module => return Some(Node::Module(self.parse_module())),
            Rule::Application => self.parse_application().map(Node::Application),
            Rule::Attributes => self.parse_attributes().map(|attrs| Node::Attributes { attrs }),
            Rule::Attribute => self
                .parse_attribute()
                .map(|(key, value)| Node::Attribute { key, value }),
            Rule::Declaration => self
                .parse_declaration()
                .map(|(name, ty)| Node::Declaration { name, ty }),
            Rule::EnumItem => self
                .parse_enum_item()
                .map(|(name, value)| Node::EnumItem { name, value }),
            Rule::Field => self.parse_field().map(|(name, ty)| Node::Field { name, ty }),
            Rule::TypeRef => self.parse_type_ref().map(Node::TypeRef),
            Rule::FieldAttrs => self.parse_field_attrs().map(|attrs| Node::FieldAttrs { attrs }),
            Rule::FieldAttr => self
                .parse_field_attr()
                .map(|(name, value)| Node::FieldAttr { name, value }),
            Rule::Endpoint => self.parse_endpoint().map(Node::Endpoint),
        };

        let result = result.and_then(|node| {
            if self.at(TokenKind::Eof) {
                Ok(node)
            } else {
                self.failed_rule = Some(rule);
                Err(ParseError::trailing(rule.name(), &self.current()))
            }
        });

        match result {
            Ok(node) => Some(node),
            Err(error) => {
                self.report(error);
                None
            }
        }
    }

    // === Module ===

    /// `module := application* EOF`
    ///
    /// Stops at the first syntax error; applications completed before it
    /// stay in the returned module.
    pub fn parse_module(&mut self) -> Module {
        let start = self.span();
        let mut module = Module::default();

        while !self.at(TokenKind::Eof) {
            match self.parse_application() {
                Ok(app) => {
                    let name = app.name.clone();
                    builder::merge(&mut module.apps, Site::Application, name, app);
                }
                Err(error) => {
                    self.report(error);
                    break;
                }
            }
        }

        module.span = self.span_from(start);
        module
    }

    // === Applications ===

    /// `application := Identifier attributes? ':' member*`
    pub fn parse_application(&mut self) -> Result<Application, ParseError> {
        self.enter(Rule::Application, |p| {
            let start = p.span();
            let name = p.consume(TokenKind::Identifier)?;
            let attrs = p.optional_attributes()?;
            p.consume(TokenKind::Colon)?;

            let mut members = NameMap::new();
            while p.at_member() {
                let (name, member) = p.parse_member()?;
                builder::merge(&mut members, Site::Member, name, member);
            }

            Ok(builder::application(name.text, attrs, members, p.span_from(start)))
        })
    }

    fn at_member(&self) -> bool {
        self.peek().is_decl_marker() || self.at(TokenKind::Path)
    }

    /// `member := declaration | endpoint`, tried in that order
    fn parse_member(&mut self) -> Result<(String, Member), ParseError> {
        if self.peek().is_decl_marker() {
            let (name, ty) = self.parse_declaration()?;
            Ok((name, Member::Type(ty)))
        } else if self.at(TokenKind::Path) {
            let endpoint = self.parse_endpoint()?;
            Ok((endpoint.name.clone(), Member::Endpoint(endpoint)))
        } else {
            Err(ParseError::no_viable(
                "a type or endpoint declaration",
                &self.current(),
            ))
        }
    }

    /// `attributes := '[' (attribute (',' attribute)*)? ']'`
    pub fn parse_attributes(&mut self) -> Result<NameMap<Attribute>, ParseError> {
        self.enter(Rule::Attributes, |p| {
            p.bracketed_list(Site::Attribute, |p| p.parse_attribute())
        })
    }

    /// `attribute := SmallIdentifier '=' (String | Namespace)`
    pub fn parse_attribute(&mut self) -> Result<(String, Attribute), ParseError> {
        self.enter(Rule::Attribute, |p| {
            let key = p.consume(TokenKind::SmallIdentifier)?;
            p.consume(TokenKind::Equals)?;
            let value = p.current();
            match value.kind {
                TokenKind::String | TokenKind::Namespace => {
                    p.advance();
                    Ok((key.text.to_string(), builder::string_value(&value)))
                }
                _ => Err(ParseError::no_viable("a quoted value or namespace", &value)),
            }
        })
    }

    // === Type declarations ===

    /// `declaration := ('!table' | '!type' | '!enum') Identifier attributes? ':' body`
    pub fn parse_declaration(&mut self) -> Result<(String, Type), ParseError> {
        self.enter(Rule::Declaration, |p| {
            let start = p.span();
            let marker = p.current();
            let decl = DeclKind::from_token(marker.kind).ok_or_else(|| {
                ParseError::no_viable("'!table', '!type' or '!enum'", &marker)
            })?;
            p.advance();

            let name = p.consume(TokenKind::Identifier)?;
            let attrs = p.optional_attributes()?;
            p.consume(TokenKind::Colon)?;

            // The body is complete before the node is built, so a relation's
            // key sees every field.
            let kind = match decl {
                DeclKind::Table => builder::relation(p.parse_fields()?),
                DeclKind::Type => builder::tuple(p.parse_fields()?),
                DeclKind::Enum => builder::enumeration(p.parse_enum_items()?),
            };

            let ty = builder::declared_type(kind, attrs, p.span_from(start));
            Ok((name.text.to_string(), ty))
        })
    }

    fn at_field(&self) -> bool {
        self.at(TokenKind::SmallIdentifier)
            || (self.peek().is_primitive() && self.peek_ahead(1) == TokenKind::Subset)
    }

    fn parse_fields(&mut self) -> Result<NameMap<Type>, ParseError> {
        let mut fields = NameMap::new();
        while self.at_field() {
            let (name, ty) = self.parse_field()?;
            builder::merge(&mut fields, Site::Field, name, ty);
        }
        Ok(fields)
    }

    fn at_enum_item(&self) -> bool {
        match self.peek() {
            TokenKind::SmallIdentifier => true,
            TokenKind::Identifier => {
                self.peek_ahead(1) == TokenKind::Colon && self.peek_ahead(2) == TokenKind::Integer
            }
            _ => false,
        }
    }

    fn parse_enum_items(&mut self) -> Result<NameMap<i64>, ParseError> {
        let mut items = NameMap::new();
        while self.at_enum_item() {
            let (name, value) = self.parse_enum_item()?;
            builder::merge(&mut items, Site::EnumItem, name, value);
        }
        Ok(items)
    }

    /// `enum_item := (Identifier | SmallIdentifier) ':' Integer`
    pub fn parse_enum_item(&mut self) -> Result<(String, i64), ParseError> {
        self.enter(Rule::EnumItem, |p| {
            let name = p.current();
            if !matches!(name.kind, TokenKind::Identifier | TokenKind::SmallIdentifier) {
                return Err(ParseError::unexpected("enum item name", &name));
            }
            p.advance();
            p.consume(TokenKind::Colon)?;
            let literal = p.consume(TokenKind::Integer)?;
            let value = literal
                .text
                .parse::<i64>()
                .map_err(|_| ParseError::invalid_integer(&literal))?;
            Ok((name.text.to_string(), value))
        })
    }

    // === Fields ===

    /// `field := field_name '<:' type_ref '?'? field_attrs?`
    pub fn parse_field(&mut self) -> Result<(String, Type), ParseError> {
        self.enter(Rule::Field, |p| {
            let start = p.span();
            let name = p.current();
            if !(name.kind == TokenKind::SmallIdentifier || name.kind.is_primitive()) {
                return Err(ParseError::unexpected("field name", &name));
            }
            p.advance();
            p.consume(TokenKind::Subset)?;

            let ty = p.parse_type_ref()?;
            let optional = p.eat(TokenKind::Question);
            let attrs = if p.at(TokenKind::LBracket) {
                p.parse_field_attrs()?
            } else {
                NameMap::new()
            };

            let ty = builder::field(ty, optional, attrs, p.span_from(start));
            Ok((name.text.to_string(), ty))
        })
    }

    /// `type_ref := int | decimal | string | date | ForeignKey | Identifier`
    pub fn parse_type_ref(&mut self) -> Result<Type, ParseError> {
        self.enter(Rule::TypeRef, |p| {
            let token = p.current();
            let kind = builder::type_ref(&token).ok_or_else(|| {
                ParseError::no_viable("a type (int, decimal, string, date, Type or Type.field)", &token)
            })?;
            p.advance();
            Ok(Type::new(kind, token.span))
        })
    }

    /// `field_attrs := '[' (field_attr (',' field_attr)*)? ']'`
    pub fn parse_field_attrs(&mut self) -> Result<NameMap<Attribute>, ParseError> {
        self.enter(Rule::FieldAttrs, |p| {
            p.bracketed_list(Site::Attribute, |p| p.parse_field_attr())
        })
    }

    /// `field_attr := '~'? SmallIdentifier`
    pub fn parse_field_attr(&mut self) -> Result<(String, Attribute), ParseError> {
        self.enter(Rule::FieldAttr, |p| {
            let negated = p.eat(TokenKind::Tilde);
            let name = p.consume(TokenKind::SmallIdentifier)?;
            Ok((name.text.to_string(), builder::flag(negated)))
        })
    }

    // === Endpoints ===

    /// `endpoint := Path Method attributes? ':'`
    ///
    /// Endpoint bodies are not parsed.
    pub fn parse_endpoint(&mut self) -> Result<Endpoint, ParseError> {
        self.enter(Rule::Endpoint, |p| {
            let start = p.span();
            let path = p.consume(TokenKind::Path)?;
            let token = p.current();
            let method = builder::method(token.kind).ok_or_else(|| {
                ParseError::no_viable("an HTTP method (GET, POST, PUT, DELETE)", &token)
            })?;
            p.advance();
            let attrs = p.optional_attributes()?;
            p.consume(TokenKind::Colon)?;
            Ok(builder::endpoint(path.text, method, attrs, p.span_from(start)))
        })
    }
}
