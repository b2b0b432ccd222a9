//! Interned declaration tables for one run.
//!
//! [`Program::build`] merges every loaded [`Model`] into lookup tables keyed by
//! stable ids, and builds the [`TypeGraph`] used for all hierarchy queries.

use std::collections::HashMap;

use crate::diagnostics::Subject;
use crate::error::{Error, Result};
use crate::hierarchy::{TypeGraph, TypeId};
use crate::model::{HostMethod, HostType, Model};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FnId(u32);

/// A declared type and the ids of its methods.
#[derive(Debug)]
pub struct TypeDecl {
    pub id: TypeId,
    pub host: HostType,
    pub methods: Vec<FnId>,
}

/// A declared method and a back-reference to its enclosing type.
#[derive(Debug)]
pub struct FnDecl {
    pub id: FnId,
    pub owner: TypeId,
    pub host: HostMethod,
}

#[derive(Debug, Default)]
pub struct Program {
    pub graph: TypeGraph,
    types: HashMap<TypeId, TypeDecl>,
    /// Declared types in input order.
    order: Vec<TypeId>,
    fns: Vec<FnDecl>,
}

impl Program {
    pub fn build(models: impl IntoIterator<Item = Model>) -> Result<Program> {
        let mut program = Program::default();

        for model in models {
            for mut host in model.types {
                let id = program.graph.intern(&host.id);
                if program.types.contains_key(&id) {
                    return Err(Error::DuplicateType(host.id));
                }

                let superclass = host.superclass.as_deref().map(|s| program.graph.intern(s));
                let interfaces = host
                    .interfaces
                    .iter()
                    .map(|i| program.graph.intern(i))
                    .collect();
                program.graph.declare(id, host.kind, superclass, interfaces);

                let methods = std::mem::take(&mut host.methods)
                    .into_iter()
                    .map(|method| {
                        let fn_id = FnId(program.fns.len() as u32);
                        program.fns.push(FnDecl {
                            id: fn_id,
                            owner: id,
                            host: method,
                        });
                        fn_id
                    })
                    .collect();

                program.order.push(id);
                program.types.insert(id, TypeDecl { id, host, methods });
            }
        }

        tracing::debug!(
            types = program.order.len(),
            methods = program.fns.len(),
            "built declaration tables"
        );
        Ok(program)
    }

    /// Declared types in input order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> + '_ {
        self.order.iter().map(|id| &self.types[id])
    }

    /// The declaration of `id`, if it is declared in the model rather than only named.
    pub fn type_decl(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(&id)
    }

    pub fn fns(&self) -> impl Iterator<Item = &FnDecl> + '_ {
        self.fns.iter()
    }

    pub fn fn_decl(&self, id: FnId) -> &FnDecl {
        &self.fns[id.0 as usize]
    }

    /// Methods declared directly on `id`.
    pub fn methods_of(&self, id: TypeId) -> impl Iterator<Item = &FnDecl> + '_ {
        self.types
            .get(&id)
            .into_iter()
            .flat_map(|decl| decl.methods.iter().map(|&f| self.fn_decl(f)))
    }

    pub fn type_subject(&self, id: TypeId) -> Subject {
        let decl = &self.types[&id];
        Subject {
            name: decl.host.id.clone(),
            location: decl.host.source.clone(),
        }
    }

    pub fn fn_subject(&self, id: FnId) -> Subject {
        let decl = self.fn_decl(id);
        Subject {
            name: format!("{}#{}", self.graph.name(decl.owner), decl.host.name),
            location: decl.host.source.clone(),
        }
    }
}
