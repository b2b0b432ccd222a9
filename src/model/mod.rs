//! Declaration model exported by the host compiler.
//!
//! This is the boundary with the discovery collaborator: a set of declared
//! types, each with its methods, documentation trees and position in the host
//! type hierarchy. Everything here is plain data deserialized from JSON; the
//! interned, queryable form lives in [`crate::program`].

pub mod doc;
pub mod ty;

use serde::Deserialize;

pub use doc::{AttrValue, Attribute, DocComment, DocNode, RefTarget, Reference};
pub use ty::{NumberRepr, StringRepr, TypeDesc};

/// One declaration model file.
#[derive(Debug, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub types: Vec<HostType>,
}

/// What sort of type the host declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A type declaration as seen by the host compiler.
#[derive(Debug, Deserialize)]
pub struct HostType {
    /// Fully qualified name, unique across all model files.
    pub id: String,
    /// Simple (unqualified) name.
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    pub source: SourcePos,
    #[serde(default)]
    pub doc: Option<DocComment>,
    #[serde(default)]
    pub methods: Vec<HostMethod>,
}

/// A method declaration.
#[derive(Debug, Deserialize)]
pub struct HostMethod {
    pub name: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// The callable marker. Methods without it are not part of the Lua surface.
    #[serde(default)]
    pub lua_function: Option<LuaFunction>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub returns: TypeDesc,
    /// The return value may be `nil`.
    #[serde(default)]
    pub nullable: bool,
    pub source: SourcePos,
    #[serde(default)]
    pub doc: Option<DocComment>,
}

/// Arguments of the callable marker.
#[derive(Debug, Default, Deserialize)]
pub struct LuaFunction {
    /// Overrides the method's own name. The first entry is the primary name.
    #[serde(default)]
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
}

/// Position of a declaration in its source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct SourcePos {
    pub file: String,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl HostMethod {
    /// True if `self` overrides `other`: same name and the same parameter types.
    pub fn overrides(&self, other: &HostMethod) -> bool {
        !self.is_static
            && !other.is_static
            && self.name == other.name
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty == b.ty)
    }
}
