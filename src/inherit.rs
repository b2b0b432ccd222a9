//! `{@inheritDoc}` resolution.

use crate::model::DocComment;
use crate::program::{FnId, Program};

/// Find the documentation `method` inherits: the nearest overridden method,
/// searching supertypes breadth-first (superclass before interfaces), with a
/// non-empty doc comment.
pub fn inherited_doc(program: &Program, method: FnId) -> Option<(FnId, &DocComment)> {
    let current = program.fn_decl(method);
    program
        .graph
        .ancestors(current.owner)
        .into_iter()
        .flat_map(|ty| program.methods_of(ty))
        .filter(|candidate| current.host.overrides(&candidate.host))
        .find_map(|candidate| {
            candidate
                .host
                .doc
                .as_ref()
                .filter(|doc| !doc.is_empty())
                .map(|doc| (candidate.id, doc))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use serde_json::json;

    fn add(line: u32, doc: serde_json::Value) -> serde_json::Value {
        json!({
            "name": "add", "lua_function": {},
            "params": [{ "name": "x", "type": { "kind": "number" } }],
            "returns": { "kind": "number" },
            "source": { "file": "A.java", "line": line },
            "doc": doc
        })
    }

    fn text(body: &str) -> serde_json::Value {
        json!({ "body": [{ "kind": "text", "body": body }] })
    }

    fn program() -> Program {
        let model: Model = serde_json::from_value(json!({ "types": [
            { "id": "Base", "name": "Base", "source": { "file": "A.java", "line": 1 },
              "methods": [add(2, text("from base"))] },
            { "id": "Iface", "name": "Iface", "kind": "interface", "source": { "file": "A.java", "line": 5 },
              "methods": [add(6, text("from iface"))] },
            { "id": "Middle", "name": "Middle", "superclass": "Base", "interfaces": ["Iface"],
              "source": { "file": "A.java", "line": 10 },
              "methods": [add(11, json!(null))] },
            { "id": "Leaf", "name": "Leaf", "superclass": "Middle", "source": { "file": "A.java", "line": 20 },
              "methods": [add(21, json!({ "body": [{ "kind": "inherit_doc" }] }))] },
            { "id": "Lonely", "name": "Lonely", "source": { "file": "A.java", "line": 30 },
              "methods": [add(31, json!({ "body": [{ "kind": "inherit_doc" }] }))] }
        ]}))
        .unwrap();
        Program::build([model]).unwrap()
    }

    fn method_on(program: &Program, ty: &str) -> FnId {
        let id = program.graph.lookup(ty).unwrap();
        program.methods_of(id).next().unwrap().id
    }

    #[test]
    fn skips_undocumented_ancestors() {
        let program = program();
        let leaf = method_on(&program, "Leaf");
        let (found, doc) = inherited_doc(&program, leaf).unwrap();
        assert_eq!(found, method_on(&program, "Base"));
        assert_eq!(doc.body, vec![crate::model::DocNode::Text { body: "from base".into() }]);
    }

    #[test]
    fn interfaces_come_after_the_superclass() {
        let program = program();
        let middle = method_on(&program, "Middle");
        let (found, _) = inherited_doc(&program, middle).unwrap();
        assert_eq!(found, method_on(&program, "Base"));
    }

    #[test]
    fn missing_ancestor() {
        let program = program();
        assert!(inherited_doc(&program, method_on(&program, "Lonely")).is_none());
    }
}
