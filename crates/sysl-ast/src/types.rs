//! Type representations in Sysl models

use serde::{Deserialize, Serialize};

use crate::{Attribute, NameMap, Span};

/// A declared or field type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub kind: TypeKind,
    /// Set by a trailing `?`
    pub optional: bool,
    pub attrs: NameMap<Attribute>,
    pub span: Span,
}

impl Type {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self {
            kind,
            optional: false,
            attrs: NameMap::new(),
            span,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match &self.kind {
            TypeKind::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn relation(&self) -> Option<&Relation> {
        match &self.kind {
            TypeKind::Relation(r) => Some(r),
            _ => None,
        }
    }

    /// True when `name` is present as a non-negated flag
    pub fn has_flag(&self, name: &str) -> bool {
        matches!(self.attrs.get(name), Some(Attribute::Flag { negated: false }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    /// `int`, `decimal`, `string`, `date`
    Primitive(Primitive),

    /// `!table Name:` with fields and a derived primary key
    Relation(Relation),

    /// `!type Name:` with fields
    Tuple(Tuple),

    /// `!enum Name:` with integer-valued items
    Enum(Enumeration),

    /// Named type: `Employee`
    TypeRef(ScopedRef),

    /// Reference to another type's field: `Employee.employeeId`
    ForeignKey(ScopedRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Primitive {
    Int,
    Decimal,
    String,
    Date,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Decimal => "decimal",
            Primitive::String => "string",
            Primitive::Date => "date",
        }
    }
}

/// A dotted path naming another declaration: `Employee.employeeId`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedRef {
    pub path: Vec<String>,
    pub span: Span,
}

impl ScopedRef {
    pub fn new(path: Vec<String>, span: Span) -> Self {
        Self { path, span }
    }

    /// Split a dotted token into its segments, keeping their order.
    pub fn parse(dotted: &str, span: Span) -> Self {
        Self::new(dotted.split('.').map(str::to_string).collect(), span)
    }

    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// A table. The primary key is derived from the fields and never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RelationFields")]
pub struct Relation {
    fields: NameMap<Type>,
    primary_key: Vec<String>,
}

impl Relation {
    pub fn new(fields: NameMap<Type>) -> Self {
        let mut relation = Self {
            fields,
            primary_key: Vec::new(),
        };
        relation.derive_primary_key();
        relation
    }

    pub fn fields(&self) -> &NameMap<Type> {
        &self.fields
    }

    /// Names of `pk`-flagged fields, in declaration order
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Add or replace a field; the primary key is recomputed.
    pub fn insert_field(&mut self, name: impl Into<String>, ty: Type) -> Option<Type> {
        let replaced = self.fields.merge(name, ty);
        self.derive_primary_key();
        replaced
    }

    fn derive_primary_key(&mut self) {
        self.primary_key = self
            .fields
            .iter()
            .filter(|(_, ty)| ty.has_flag(PRIMARY_KEY_FLAG))
            .map(|(name, _)| name.to_string())
            .collect();
    }
}

/// Field flag marking primary-key membership
pub const PRIMARY_KEY_FLAG: &str = "pk";

#[derive(Deserialize)]
struct RelationFields {
    fields: NameMap<Type>,
}

impl From<RelationFields> for Relation {
    fn from(raw: RelationFields) -> Self {
        Relation::new(raw.fields)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tuple {
    pub fields: NameMap<Type>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Enumeration {
    pub items: NameMap<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(flags: &[(&str, bool)]) -> Type {
        let mut ty = Type::new(TypeKind::Primitive(Primitive::Int), Span::dummy());
        for (name, negated) in flags {
            ty.attrs.merge(*name, Attribute::Flag { negated: *negated });
        }
        ty
    }

    #[test]
    fn test_primary_key_follows_declaration_order() {
        let fields: NameMap<Type> = [
            ("a", field(&[("pk", false)])),
            ("b", field(&[])),
            ("c", field(&[("pk", false), ("autoinc", false)])),
        ]
        .into_iter()
        .collect();
        let relation = Relation::new(fields);
        assert_eq!(relation.primary_key(), &["a", "c"]);
    }

    #[test]
    fn test_negated_pk_is_not_a_key() {
        let relation = Relation::new([("a", field(&[("pk", true)]))].into_iter().collect());
        assert!(relation.primary_key().is_empty());
    }

    #[test]
    fn test_insert_field_recomputes_key() {
        let mut relation = Relation::new([("a", field(&[("pk", false)]))].into_iter().collect());
        relation.insert_field("b", field(&[("pk", false)]));
        assert_eq!(relation.primary_key(), &["a", "b"]);

        relation.insert_field("a", field(&[]));
        assert_eq!(relation.primary_key(), &["b"]);
    }

    #[test]
    fn test_deserialized_relation_rederives_key() {
        let relation = Relation::new([("id", field(&[("pk", false)]))].into_iter().collect());
        let mut json = serde_json::to_value(&relation).unwrap();
        json["primary_key"] = serde_json::json!(["bogus"]);
        let back: Relation = serde_json::from_value(json).unwrap();
        assert_eq!(back.primary_key(), &["id"]);
    }

    #[test]
    fn test_scoped_ref_keeps_segment_order() {
        let r = ScopedRef::parse("Employee.employeeId", Span::dummy());
        assert_eq!(r.path, vec!["Employee", "employeeId"]);
        assert_eq!(r.dotted(), "Employee.employeeId");
    }
}
