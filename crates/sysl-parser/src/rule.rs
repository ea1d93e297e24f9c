//! Grammar rules that can be selected as a start rule

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use sysl_ast::{Application, Attribute, Endpoint, Module, NameMap, Type};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rule {
    #[default]
    Module,
    Application,
    Attributes,
    Attribute,
    Declaration,
    EnumItem,
    Field,
    TypeRef,
    FieldAttrs,
    FieldAttr,
    Endpoint,
}

impl Rule {
    pub const ALL: [Rule; 11] = [
        Rule::Module,
        Rule::Application,
        Rule::Attributes,
        Rule::Attribute,
        Rule::Declaration,
        Rule::EnumItem,
        Rule::Field,
        Rule::TypeRef,
        Rule::FieldAttrs,
        Rule::FieldAttr,
        Rule::Endpoint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::Module => "module",
            Rule::Application => "application",
            Rule::Attributes => "attributes",
            Rule::Attribute => "attribute",
            Rule::Declaration => "declaration",
            Rule::EnumItem => "enum_item",
            Rule::Field => "field",
            Rule::TypeRef => "type_ref",
            Rule::FieldAttrs => "field_attrs",
            Rule::FieldAttr => "field_attr",
            Rule::Endpoint => "endpoint",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule '{0}'")]
pub struct UnknownRule(pub String);

impl FromStr for Rule {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// The value produced by a start rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Node {
    Module(Module),
    Application(Application),
    Attributes { attrs: NameMap<Attribute> },
    Attribute { key: String, value: Attribute },
    Declaration { name: String, ty: Type },
    EnumItem { name: String, value: i64 },
    Field { name: String, ty: Type },
    TypeRef(Type),
    FieldAttrs { attrs: NameMap<Attribute> },
    FieldAttr { name: String, value: Attribute },
    Endpoint(Endpoint),
}
