//! Lua names for host declarations.

use crate::extract::Declarations;
use crate::hierarchy::TypeId;
use crate::model::{RefTarget, TypeKind};
use crate::program::Program;
use crate::render::{TermResolver, TypeNames};

/// Resolves references relative to the class currently being documented.
pub struct Names<'a> {
    program: &'a Program,
    decls: &'a Declarations,
    /// References to functions of this class are left unqualified.
    context: Option<TypeId>,
}

impl<'a> Names<'a> {
    pub fn new(program: &'a Program, decls: &'a Declarations, context: Option<TypeId>) -> Self {
        Self {
            program,
            decls,
            context,
        }
    }
}

impl TermResolver for Names<'_> {
    fn resolve_term(&self, target: &RefTarget) -> Option<String> {
        match target {
            RefTarget::Type { id } => self.type_name(id),
            RefTarget::Method { owner, name } => {
                let owner = self.program.graph.lookup(owner)?;
                let info = self
                    .program
                    .methods_of(owner)
                    .filter(|f| f.host.name == *name)
                    .find_map(|f| self.decls.methods.get(&f.id))?;

                let class = self.decls.resolve_type(self.program, owner)?;
                if Some(class.id) == self.context {
                    Some(info.name().to_string())
                } else {
                    Some(format!("{}.{}", class.reference_name(), info.name()))
                }
            }
        }
    }
}

impl TypeNames for Names<'_> {
    fn type_name(&self, id: &str) -> Option<String> {
        let id = self.program.graph.lookup(id)?;
        self.decls.classes.get(&id).map(|c| c.reference_name())
    }

    fn is_enum(&self, id: &str) -> bool {
        self.program
            .graph
            .lookup(id)
            .is_some_and(|id| self.program.graph.kind(id) == Some(TypeKind::Enum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Capabilities;
    use crate::diagnostics::Reporter;
    use crate::model::Model;
    use serde_json::json;

    fn module(id: &str, name: &str, line: u32, methods: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id, "name": id, "interfaces": ["dan200.computercraft.api.lua.ILuaAPI"],
            "source": { "file": "A.java", "line": line },
            "doc": { "tags": [{ "kind": "block_tag", "name": "cc.module", "content": [{ "kind": "text", "body": name }] }] },
            "methods": methods
        })
    }

    fn setup() -> (Program, Declarations) {
        let model: Model = serde_json::from_value(json!({ "types": [
            module("a.Fs", "fs", 1, json!([
                { "name": "open", "lua_function": {}, "source": { "file": "A.java", "line": 2 } },
                { "name": "helper", "source": { "file": "A.java", "line": 3 } }
            ])),
            module("a.Os", "os", 10, json!([])),
            { "id": "a.Side", "name": "Side", "kind": "enum", "source": { "file": "A.java", "line": 20 } }
        ]}))
        .unwrap();
        let program = Program::build([model]).unwrap();
        let decls = Declarations::extract(&program, &Capabilities::default(), &Reporter::new());
        (program, decls)
    }

    fn open() -> RefTarget {
        RefTarget::Method {
            owner: "a.Fs".into(),
            name: "open".into(),
        }
    }

    #[test]
    fn qualifies_functions_of_other_modules() {
        let (program, decls) = setup();
        let os = program.graph.lookup("a.Os");
        let names = Names::new(&program, &decls, os);
        assert_eq!(names.resolve_term(&open()).as_deref(), Some("fs.open"));
    }

    #[test]
    fn own_functions_are_unqualified() {
        let (program, decls) = setup();
        let fs = program.graph.lookup("a.Fs");
        assert_eq!(Names::new(&program, &decls, fs).resolve_term(&open()).as_deref(), Some("open"));
    }

    #[test]
    fn non_lua_methods_are_unrepresentable() {
        let (program, decls) = setup();
        let names = Names::new(&program, &decls, None);
        let helper = RefTarget::Method {
            owner: "a.Fs".into(),
            name: "helper".into(),
        };
        assert_eq!(names.resolve_term(&helper), None);
        assert_eq!(names.resolve_term(&RefTarget::Type { id: "a.Side".into() }), None);
        let os = RefTarget::Type { id: "a.Os".into() };
        assert_eq!(names.resolve_term(&os).as_deref(), Some("os"));
    }

    #[test]
    fn enums_are_detected_through_the_graph() {
        let (program, decls) = setup();
        let names = Names::new(&program, &decls, None);
        assert!(names.is_enum("a.Side"));
        assert!(!names.is_enum("a.Fs"));
        assert!(!names.is_enum("a.Missing"));
    }
}
