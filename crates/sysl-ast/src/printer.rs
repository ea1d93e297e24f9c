//! Canonical text printer for Sysl models
//!
//! Serializes the tree back to source text with two-space indentation.
//! Output parses back to an equal tree (spans aside).

use crate::{Application, Attribute, Endpoint, Member, Module, NameMap, Type, TypeKind};

/// Trait for converting AST nodes to canonical Sysl text.
pub trait ToSysl {
    /// Convert to canonical text with the given indentation level.
    fn to_sysl(&self, indent: usize) -> String;
}

/// Helper to generate indentation string (two spaces per level).
fn indent_str(level: usize) -> String {
    "  ".repeat(level)
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            _ => result.push(c),
        }
    }
    result
}

/// ` [a="x", b="y"]`, or nothing when empty
fn attr_list(attrs: &NameMap<Attribute>) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let items: Vec<String> = attrs
        .iter()
        .map(|(key, attr)| match attr {
            Attribute::Str(value) => format!("{}=\"{}\"", key, escape_string(value)),
            Attribute::Flag { negated: true } => format!("~{}", key),
            Attribute::Flag { negated: false } => key.to_string(),
        })
        .collect();
    format!(" [{}]", items.join(", "))
}

impl ToSysl for Module {
    fn to_sysl(&self, indent: usize) -> String {
        self.apps
            .values()
            .map(|app| app.to_sysl(indent))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ToSysl for Application {
    fn to_sysl(&self, indent: usize) -> String {
        let mut out = format!("{}{}{}:\n", indent_str(indent), self.name, attr_list(&self.attrs));
        for (name, member) in self.members.iter() {
            match member {
                Member::Type(ty) => out.push_str(&declaration(name, ty, indent + 1)),
                Member::Endpoint(ep) => out.push_str(&ep.to_sysl(indent + 1)),
            }
        }
        out
    }
}

impl ToSysl for Endpoint {
    fn to_sysl(&self, indent: usize) -> String {
        format!(
            "{}/{} {}{}:\n",
            indent_str(indent),
            self.name,
            self.method,
            attr_list(&self.attrs)
        )
    }
}

/// Field type as written after `<:`, including `?` and flags
impl ToSysl for Type {
    fn to_sysl(&self, _indent: usize) -> String {
        let base = match &self.kind {
            TypeKind::Primitive(p) => p.keyword().to_string(),
            TypeKind::TypeRef(r) | TypeKind::ForeignKey(r) => r.dotted(),
            TypeKind::Relation(_) | TypeKind::Tuple(_) | TypeKind::Enum(_) => {
                "<anonymous>".to_string()
            }
        };
        let optional = if self.optional { "?" } else { "" };
        format!("{}{}{}", base, optional, attr_list(&self.attrs))
    }
}

fn declaration(name: &str, ty: &Type, indent: usize) -> String {
    let marker = match &ty.kind {
        TypeKind::Relation(_) => "!table",
        TypeKind::Enum(_) => "!enum",
        _ => "!type",
    };
    let mut out = format!("{}{} {}{}:\n", indent_str(indent), marker, name, attr_list(&ty.attrs));
    let body = indent_str(indent + 1);
    match &ty.kind {
        TypeKind::Relation(relation) => {
            for (field, field_ty) in relation.fields().iter() {
                out.push_str(&format!("{}{} <: {}\n", body, field, field_ty.to_sysl(0)));
            }
        }
        TypeKind::Tuple(tuple) => {
            for (field, field_ty) in tuple.fields.iter() {
                out.push_str(&format!("{}{} <: {}\n", body, field, field_ty.to_sysl(0)));
            }
        }
        TypeKind::Enum(e) => {
            for (item, value) in e.items.iter() {
                out.push_str(&format!("{}{}: {}\n", body, item, value));
            }
        }
        TypeKind::Primitive(_) | TypeKind::TypeRef(_) | TypeKind::ForeignKey(_) => {}
    }
    out
}
