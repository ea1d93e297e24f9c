//! Application-level AST nodes

use serde::{Deserialize, Serialize};

use crate::{NameMap, Span, Type};

/// A named group of declarations: `PetShopModel [package="io.sysl.demo"]:`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub attrs: NameMap<Attribute>,
    /// Types and endpoints share one namespace
    pub members: NameMap<Member>,
    pub span: Span,
}

impl Application {
    pub fn types(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.members.iter().filter_map(|(name, member)| match member {
            Member::Type(ty) => Some((name, ty)),
            Member::Endpoint(_) => None,
        })
    }

    pub fn endpoints(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.members.iter().filter_map(|(name, member)| match member {
            Member::Endpoint(ep) => Some((name, ep)),
            Member::Type(_) => None,
        })
    }

    pub fn get_type(&self, name: &str) -> Option<&Type> {
        match self.members.get(name)? {
            Member::Type(ty) => Some(ty),
            Member::Endpoint(_) => None,
        }
    }

    pub fn get_endpoint(&self, name: &str) -> Option<&Endpoint> {
        match self.members.get(name)? {
            Member::Endpoint(ep) => Some(ep),
            Member::Type(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Type(Type),
    Endpoint(Endpoint),
}

/// `/petshop GET:`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path with the leading slash stripped
    pub name: String,
    pub method: Method,
    pub attrs: NameMap<Attribute>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata on a declaration (`key="value"`) or a field (`pk`, `~autoinc`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Str(String),
    Flag { negated: bool },
}

impl Attribute {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::Str(s) => Some(s),
            Attribute::Flag { .. } => None,
        }
    }
}
