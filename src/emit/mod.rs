//! Stub emission.
//!
//! Every Lua function is rendered once, in the context of the documented class
//! which owns it. Functions are then grouped by the host type that declares
//! them, and each group is placed into the stub of every documented class that
//! is a subtype of that host type. This is how a function declared on a shared
//! base class or interface shows up in all of its implementors.

pub mod method;
pub mod names;
pub mod stub;

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::diagnostics::Reporter;
use crate::extract::{ClassInfo, Declarations, Sort};
use crate::hierarchy::TypeId;
use crate::model::SourcePos;
use crate::program::{FnId, Program};
use crate::render::{DocRenderer, Owner};

pub use method::EmittedMethod;
pub use names::Names;
pub use stub::{write_stubs, StubDocument};

/// Functions declared directly on one host type, in source order.
#[derive(Debug)]
struct MethodGroup {
    /// The documented class the functions were rendered for.
    owner: Option<TypeId>,
    /// The host type declaring the functions.
    enclosing: TypeId,
    height: usize,
    simple_name: String,
    methods: Vec<EmittedMethod>,
}

impl MethodGroup {
    fn appears_in(&self, program: &Program, class: &ClassInfo) -> bool {
        self.owner == Some(class.id) || program.graph.is_subtype(class.id, self.enclosing)
    }

    /// Groups declared on `class` itself come first, then narrower types before
    /// broader ones, then by simple name.
    fn order_key(&self, class: &ClassInfo) -> (bool, Reverse<usize>, &str, TypeId) {
        (
            self.enclosing != class.id,
            Reverse(self.height),
            &self.simple_name,
            self.enclosing,
        )
    }
}

pub struct Emitter<'a> {
    program: &'a Program,
    decls: &'a Declarations,
    reporter: &'a Reporter,
    /// Absolute project root, for `@source` paths.
    root: PathBuf,
}

impl<'a> Emitter<'a> {
    pub fn new(
        program: &'a Program,
        decls: &'a Declarations,
        config: &Config,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            program,
            decls,
            reporter,
            root: absolute(&config.project_root),
        }
    }

    /// Build a stub for every documented class, sorted by name.
    ///
    /// Hidden classes get a stub too, so that the functions they own are not
    /// reported as orphans; [`write_stubs`] leaves them out.
    pub fn build(&self) -> Vec<StubDocument> {
        let groups = self.groups();
        let mut used = HashSet::new();

        let mut stubs: Vec<_> = self
            .decls
            .classes
            .values()
            .map(|class| self.stub(class, &groups, &mut used))
            .collect();
        stubs.sort_by(|a, b| a.name.cmp(&b.name));

        for method in groups.iter().flat_map(|g| &g.methods) {
            if !used.contains(&method.id) {
                self.reporter.note(
                    &self.program.fn_subject(method.id),
                    format!("Cannot find owner for {}", method.info.name()),
                );
            }
        }

        tracing::debug!(stubs = stubs.len(), "built stubs");
        stubs
    }

    fn groups(&self) -> Vec<MethodGroup> {
        let mut by_type: BTreeMap<TypeId, Vec<FnId>> = BTreeMap::new();
        for id in self.decls.methods.keys() {
            by_type
                .entry(self.program.fn_decl(*id).owner)
                .or_default()
                .push(*id);
        }

        by_type
            .into_iter()
            .map(|(enclosing, ids)| {
                let class = self.decls.resolve_type(self.program, enclosing);
                let mut methods: Vec<_> = ids
                    .iter()
                    .map(|id| self.method(class, &self.decls.methods[id]))
                    .collect();
                methods.sort_by(|a, b| {
                    let a = &self.program.fn_decl(a.id).host.source;
                    let b = &self.program.fn_decl(b.id).host.source;
                    a.cmp(b)
                });

                MethodGroup {
                    owner: class.map(|c| c.id),
                    enclosing,
                    height: self.program.graph.height(enclosing),
                    simple_name: self
                        .program
                        .type_decl(enclosing)
                        .map(|t| t.host.name.clone())
                        .unwrap_or_default(),
                    methods,
                }
            })
            .collect()
    }

    fn stub(
        &self,
        class: &ClassInfo,
        groups: &[MethodGroup],
        used: &mut HashSet<FnId>,
    ) -> StubDocument {
        let header = self.header(class);
        let prefix = match &class.type_name {
            Some(name) => format!("{name}."),
            None => String::new(),
        };

        let mut applicable: Vec<_> = groups
            .iter()
            .filter(|g| g.appears_in(self.program, class))
            .collect();
        applicable.sort_by(|a, b| a.order_key(class).cmp(&b.order_key(class)));

        let mut emitted: Vec<FnId> = Vec::new();
        let mut entries = Vec::new();
        for method in applicable.iter().flat_map(|g| &g.methods) {
            used.insert(method.id);

            let host = &self.program.fn_decl(method.id).host;
            let overridden = emitted
                .iter()
                .any(|id| self.program.fn_decl(*id).host.overrides(host));
            if overridden {
                continue;
            }

            let mut entry = String::from("\n");
            method.emit(&prefix, &mut entry);
            entries.push(entry);
            emitted.push(method.id);
        }

        StubDocument {
            name: class.name.clone(),
            hidden: class.hidden,
            header,
            entries,
        }
    }

    fn header(&self, class: &ClassInfo) -> String {
        let mut out = String::new();
        if class.sort() == Sort::Type {
            out.push_str("--- ");
            out.push_str(&module_tag(class));
            out.push_str("\n\n");
        }

        out.push_str("--[[- ");
        if let Some(doc) = class.doc(self.program) {
            let names = Names::new(self.program, self.decls, Some(class.id));
            let docs = DocRenderer::new(self.program, Owner::Type(class.id), &names, self.reporter);
            out.push_str(&docs.render_comment(doc).0);
        }
        if let Some(decl) = self.program.type_decl(class.id) {
            out.push_str(&self.source_tag(&decl.host.source));
        }

        match (class.sort(), &class.type_name) {
            (Sort::Type, Some(name)) => {
                out.push_str(&format!("@type {name}\n]]\n"));
                out.push_str(&format!("local {name} = {{}}\n"));
            }
            _ => {
                out.push_str(&module_tag(class));
                out.push_str("\n]]\n");
            }
        }
        out
    }

    /// `@source path:line`, with the path relative to the project root.
    pub(crate) fn source_tag(&self, source: &SourcePos) -> String {
        let file = absolute(Path::new(&source.file));
        let path = pathdiff::diff_paths(&file, &self.root).unwrap_or(file);
        let path = path.to_string_lossy().replace('\\', "/");
        format!("@source {path}:{}\n", source.line)
    }
}

fn module_tag(class: &ClassInfo) -> String {
    match &class.kind {
        Some(kind) => format!("@module[kind={kind}] {}", class.module_name),
        None => format!("@module {}", class.module_name),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Capabilities;
    use crate::diagnostics::Level;
    use crate::model::Model;
    use serde_json::json;

    fn module_doc(name: &str) -> serde_json::Value {
        json!({ "tags": [{ "kind": "block_tag", "name": "cc.module", "content": [{ "kind": "text", "body": name }] }] })
    }

    fn method(name: &str, line: u32) -> serde_json::Value {
        json!({ "name": name, "lua_function": {}, "source": { "file": "src/A.java", "line": line } })
    }

    fn run(types: serde_json::Value) -> (Vec<StubDocument>, Reporter) {
        let model: Model = serde_json::from_value(json!({ "types": types })).unwrap();
        let program = Program::build([model]).unwrap();
        let reporter = Reporter::new();
        let decls = Declarations::extract(&program, &Capabilities::default(), &reporter);
        let stubs = Emitter::new(&program, &decls, &Config::default(), &reporter).build();
        (stubs, reporter)
    }

    fn stub(stubs: &[StubDocument], name: &str) -> String {
        stubs
            .iter()
            .find(|s| s.name == name)
            .map(StubDocument::text)
            .unwrap_or_else(|| panic!("no stub {name}"))
    }

    #[test]
    fn module_header() {
        let (stubs, reporter) = run(json!([{
            "id": "a.Os", "name": "Os", "interfaces": ["dan200.computercraft.api.lua.ILuaAPI"],
            "source": { "file": "src/A.java", "line": 3 },
            "doc": module_doc("os"),
            "methods": []
        }]));
        assert!(reporter.diagnostics().is_empty());
        assert_eq!(stub(&stubs, "os"), "--[[- \n@source src/A.java:3\n@module os\n]]\n");
    }

    #[test]
    fn auxiliary_type_header_and_prefix() {
        let (stubs, _) = run(json!([{
            "id": "a.Handle", "name": "Handle",
            "source": { "file": "src/A.java", "line": 3 },
            "doc": module_doc("[kind=event] fs.Handle"),
            "methods": [method("close", 4)]
        }]));
        assert_eq!(
            stub(&stubs, "fs.Handle"),
            "--- @module[kind=event] fs\n\n\
             --[[- \n@source src/A.java:3\n@type Handle\n]]\nlocal Handle = {}\n\
             \n--[[- \n@source src/A.java:4\n]]\nfunction Handle.close() end\n"
        );
    }

    #[test]
    fn functions_are_in_source_order() {
        let (stubs, _) = run(json!([{
            "id": "a.Os", "name": "Os", "interfaces": ["dan200.computercraft.api.lua.ILuaAPI"],
            "source": { "file": "src/A.java", "line": 1 },
            "doc": module_doc("os"),
            "methods": [method("later", 20), method("earlier", 10)]
        }]));
        let text = stub(&stubs, "os");
        let earlier = text.find("function earlier").unwrap();
        let later = text.find("function later").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn inherited_groups_follow_own_functions() {
        let (stubs, _) = run(json!([
            { "id": "a.Shared", "name": "Shared", "kind": "interface",
              "source": { "file": "src/A.java", "line": 1 },
              "methods": [method("shared", 2)] },
            { "id": "a.Base", "name": "Base", "interfaces": ["a.Shared"],
              "source": { "file": "src/A.java", "line": 5 },
              "methods": [method("base", 6)] },
            { "id": "a.Drive", "name": "Drive", "superclass": "a.Base",
              "interfaces": ["dan200.computercraft.api.peripheral.IPeripheral"],
              "source": { "file": "src/A.java", "line": 10 },
              "doc": module_doc("drive"),
              "methods": [method("own", 11)] }
        ]));
        let text = stub(&stubs, "drive");
        let positions: Vec<_> = ["function own", "function base", "function shared"]
            .iter()
            .map(|f| text.find(f).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
        assert!(text.contains("@module[kind=peripheral] drive"));
    }

    #[test]
    fn overrides_are_emitted_once() {
        let (stubs, _) = run(json!([
            { "id": "a.Base", "name": "Base", "kind": "interface",
              "source": { "file": "src/A.java", "line": 1 },
              "methods": [method("name", 2)] },
            { "id": "a.Impl", "name": "Impl", "interfaces": ["a.Base", "dan200.computercraft.api.lua.ILuaAPI"],
              "source": { "file": "src/A.java", "line": 5 },
              "doc": module_doc("impl"),
              "methods": [method("name", 6)] }
        ]));
        let text = stub(&stubs, "impl");
        assert_eq!(text.matches("function name()").count(), 1);
        assert!(text.contains("@source src/A.java:6"));
        assert!(!text.contains("@source src/A.java:2"));
    }

    #[test]
    fn orphans_are_noted() {
        let (stubs, reporter) = run(json!([{
            "id": "a.Loose", "name": "Loose",
            "source": { "file": "src/A.java", "line": 1 },
            "methods": [method("lost", 2)]
        }]));
        assert!(stubs.is_empty());
        let diagnostics = reporter.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, Level::Note);
        assert_eq!(diagnostics[0].message, "Cannot find owner for lost");
    }

    #[test]
    fn hidden_owners_adopt_their_functions() {
        let (stubs, reporter) = run(json!([{
            "id": "a.Secret", "name": "Secret", "interfaces": ["dan200.computercraft.api.lua.ILuaAPI"],
            "source": { "file": "src/A.java", "line": 1 },
            "doc": { "tags": [
                { "kind": "hidden" },
                { "kind": "block_tag", "name": "cc.module", "content": [{ "kind": "text", "body": "secret" }] }
            ] },
            "methods": [method("f", 2)]
        }]));
        assert_eq!(stubs.len(), 1);
        assert!(stubs[0].hidden);
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn source_paths_are_relative_to_the_project_root() {
        let program = Program::default();
        let decls = Declarations::default();
        let reporter = Reporter::new();
        let config = Config {
            project_root: PathBuf::from("/work/project"),
            ..Config::default()
        };
        let emitter = Emitter::new(&program, &decls, &config, &reporter);
        let source = SourcePos {
            file: "/work/project/src/main/Fs.java".into(),
            line: 42,
            column: 0,
        };
        assert_eq!(emitter.source_tag(&source), "@source src/main/Fs.java:42\n");
    }
}
