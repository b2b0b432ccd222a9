//! The host type hierarchy as a precomputed graph.
//!
//! Every type name seen in the declaration model (declared or merely named as
//! a supertype) gets a stable [`TypeId`]. Subtype and ancestor queries are plain
//! reachability over superclass and interface edges.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::model::TypeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

#[derive(Debug)]
struct Node {
    name: String,
    /// `None` for types only known by name.
    kind: Option<TypeKind>,
    superclass: Option<TypeId>,
    interfaces: Vec<TypeId>,
}

#[derive(Debug, Default)]
pub struct TypeGraph {
    nodes: Vec<Node>,
    by_name: HashMap<String, TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for `name`.
    pub fn intern(&mut self, name: &str) -> TypeId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_string(),
            kind: None,
            superclass: None,
            interfaces: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Record the declared shape of `id`.
    pub fn declare(
        &mut self,
        id: TypeId,
        kind: TypeKind,
        superclass: Option<TypeId>,
        interfaces: Vec<TypeId>,
    ) {
        let node = &mut self.nodes[id.0 as usize];
        node.kind = Some(kind);
        node.superclass = superclass;
        node.interfaces = interfaces;
    }

    fn node(&self, id: TypeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.node(id).name
    }

    pub fn kind(&self, id: TypeId) -> Option<TypeKind> {
        self.node(id).kind
    }

    pub fn superclass(&self, id: TypeId) -> Option<TypeId> {
        self.node(id).superclass
    }

    /// Direct supertypes: the superclass first, then interfaces in declaration order.
    pub fn supertypes(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        let node = self.node(id);
        node.superclass.into_iter().chain(node.interfaces.iter().copied())
    }

    /// Is `sub` the same type as, or a subtype of, `sup`?
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([sub]);
        while let Some(current) = queue.pop_front() {
            for parent in self.supertypes(current) {
                if parent == sup {
                    return true;
                }
                if seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        false
    }

    /// Is `sub` a subtype of the type named `sup`? Unknown names are never supertypes.
    pub fn is_subtype_of_name(&self, sub: TypeId, sup: &str) -> bool {
        self.lookup(sup).is_some_and(|sup| self.is_subtype(sub, sup))
    }

    /// Length of the longest supertype path from `id` to a root.
    ///
    /// A strict subtype always has a greater height than each of its supertypes.
    pub fn height(&self, id: TypeId) -> usize {
        self.height_guarded(id, &mut Vec::new())
    }

    fn height_guarded(&self, id: TypeId, stack: &mut Vec<TypeId>) -> usize {
        if stack.contains(&id) {
            return 0;
        }
        stack.push(id);
        let height = self
            .supertypes(id)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|parent| self.height_guarded(parent, stack) + 1)
            .max()
            .unwrap_or(0);
        stack.pop();
        height
    }

    /// Supertypes of `id` in breadth-first order, nearest first, each visited once.
    pub fn ancestors(&self, id: TypeId) -> Vec<TypeId> {
        let mut seen = HashSet::from([id]);
        let mut order = Vec::new();
        let mut queue: VecDeque<TypeId> = self.supertypes(id).collect();
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            order.push(current);
            queue.extend(self.supertypes(current));
        }
        order
    }
}
