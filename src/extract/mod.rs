//! Declaration metadata extraction.
//!
//! Turns the raw [`Program`] into the two lookup tables the emitter works
//! from: documented types ([`ClassInfo`]) and Lua-callable methods
//! ([`MethodInfo`]). Declarations without the identifying tag or marker are
//! silently left out.

pub mod class;
pub mod method;

use std::collections::{BTreeMap, HashSet};

use crate::config::Capabilities;
use crate::diagnostics::Reporter;
use crate::hierarchy::TypeId;
use crate::model::TypeKind;
use crate::program::{FnId, Program};

pub use class::{ClassInfo, Classification, Sort};
pub use method::MethodInfo;

#[derive(Debug, Default)]
pub struct Declarations {
    pub classes: BTreeMap<TypeId, ClassInfo>,
    pub methods: BTreeMap<FnId, MethodInfo>,
}

impl Declarations {
    pub fn extract(program: &Program, capabilities: &Capabilities, reporter: &Reporter) -> Self {
        let classes: BTreeMap<_, _> = program
            .types()
            .filter_map(|ty| ClassInfo::of(program, ty.id, capabilities, reporter))
            .map(|info| (info.id, info))
            .collect();

        let methods: BTreeMap<_, _> = program
            .fns()
            .filter_map(|f| MethodInfo::of(program, f.id))
            .map(|info| (info.id, info))
            .collect();

        let decls = Declarations { classes, methods };
        for id in decls.methods.keys() {
            decls.check_dispatch(program, *id, reporter);
        }

        tracing::debug!(
            classes = decls.classes.len(),
            methods = decls.methods.len(),
            "extracted declarations"
        );
        decls
    }

    /// The nearest documented class for `ty`, walking up the declared superclass chain.
    ///
    /// Interfaces and enums never own Lua functions.
    pub fn resolve_type(&self, program: &Program, ty: TypeId) -> Option<&ClassInfo> {
        let mut seen = HashSet::new();
        let mut current = Some(ty);
        while let Some(id) = current {
            if !seen.insert(id) {
                return None;
            }
            if matches!(
                program.graph.kind(id),
                Some(TypeKind::Interface | TypeKind::Enum)
            ) {
                return None;
            }
            if let Some(info) = self.classes.get(&id) {
                return Some(info);
            }
            current = program.graph.superclass(id);
        }
        None
    }

    /// Static functions are only valid on object-kind-dispatched modules, and
    /// such modules only accept static functions.
    fn check_dispatch(&self, program: &Program, id: FnId, reporter: &Reporter) {
        let decl = program.fn_decl(id);
        let generic = self
            .resolve_type(program, decl.owner)
            .is_some_and(|c| c.classification == Classification::GenericSource);

        match (decl.host.is_static, generic) {
            (true, false) => reporter.error(
                &program.fn_subject(id),
                "Cannot have static methods on non-generic sources",
            ),
            (false, true) => reporter.error(
                &program.fn_subject(id),
                "Generic sources can only have static methods",
            ),
            _ => {}
        }
    }
}
