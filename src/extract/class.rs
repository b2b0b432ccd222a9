//! Metadata for documented types.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::Capabilities;
use crate::diagnostics::Reporter;
use crate::hierarchy::TypeId;
use crate::model::doc::plain_text;
use crate::model::DocComment;
use crate::program::Program;

/// `[kind=name] rest`, prefixing an auxiliary type's identifier.
static RE_KIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\[kind=([^\]]*)\]\s*(.*)$").unwrap());

/// How a documented type is exposed to Lua.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A global API module.
    Api,
    /// A stateful object (peripheral) module.
    Peripheral,
    /// A module whose functions are dispatched on an object of some kind.
    GenericSource,
    /// An auxiliary type, nested under a module's namespace.
    Type,
}

/// Whether the type is rendered as a module or as a type within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Module,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub id: TypeId,
    /// The full identifier, without any `[kind=...]` prefix. Also the artifact name.
    pub name: String,
    pub classification: Classification,
    /// Dialect-level kind tag, e.g. `peripheral`.
    pub kind: Option<String>,
    pub module_name: String,
    /// Local name within the module. Only present for auxiliary types.
    pub type_name: Option<String>,
    pub hidden: bool,
}

impl ClassInfo {
    /// Extract metadata for `id`.
    ///
    /// Returns `None` when the type has no `@cc.module` tag (it is not part of the
    /// documented surface) or when the tag is malformed (reported).
    pub fn of(
        program: &Program,
        id: TypeId,
        capabilities: &Capabilities,
        reporter: &Reporter,
    ) -> Option<ClassInfo> {
        let doc = program.type_decl(id)?.host.doc.as_ref()?;
        let name = plain_text(doc.block_tag("cc.module")?).trim().to_string();
        if name.is_empty() {
            return None;
        }

        let graph = &program.graph;
        let classification = if graph.is_subtype_of_name(id, &capabilities.lua_api) {
            Classification::Api
        } else if graph.is_subtype_of_name(id, &capabilities.peripheral) {
            Classification::Peripheral
        } else if graph.is_subtype_of_name(id, &capabilities.generic_source) {
            Classification::GenericSource
        } else {
            Classification::Type
        };

        let hidden = doc.is_hidden();
        let info = match classification {
            Classification::Api => Self::module(id, name, classification, None, hidden),
            Classification::Peripheral => {
                Self::module(id, name, classification, Some("peripheral"), hidden)
            }
            Classification::GenericSource => {
                Self::module(id, name, classification, Some("generic_peripheral"), hidden)
            }
            Classification::Type => {
                let (kind, name) = if name.starts_with("[kind=") {
                    let Some(caps) = RE_KIND.captures(&name) else {
                        reporter.error(
                            &program.type_subject(id),
                            format!("Malformed kind in @cc.module {name} (missing ']')"),
                        );
                        return None;
                    };
                    (Some(caps[1].trim().to_string()), caps[2].trim().to_string())
                } else {
                    (None, name)
                };

                let (module_name, type_name) = match name.split_once('.') {
                    Some((module, ty)) => (module.to_string(), ty.to_string()),
                    None => (name.clone(), name.clone()),
                };
                ClassInfo {
                    id,
                    name,
                    classification,
                    kind,
                    module_name,
                    type_name: Some(type_name),
                    hidden,
                }
            }
        };
        Some(info)
    }

    fn module(
        id: TypeId,
        name: String,
        classification: Classification,
        kind: Option<&str>,
        hidden: bool,
    ) -> ClassInfo {
        ClassInfo {
            id,
            module_name: name.clone(),
            name,
            classification,
            kind: kind.map(str::to_string),
            type_name: None,
            hidden,
        }
    }

    pub fn sort(&self) -> Sort {
        match self.classification {
            Classification::Type => Sort::Type,
            _ => Sort::Module,
        }
    }

    /// Name used when other documentation links to this type.
    pub fn reference_name(&self) -> String {
        match &self.kind {
            Some(kind) => format!("{kind}!{}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn doc<'p>(&self, program: &'p Program) -> Option<&'p DocComment> {
        program.type_decl(self.id)?.host.doc.as_ref()
    }
}
