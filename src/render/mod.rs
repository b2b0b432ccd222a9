//! Rendering of documentation trees and host types into the Lua doc dialect.
//!
//! Both renderers are pure functions of their input plus a name-resolution
//! collaborator supplied by the caller; problems go to the [`Reporter`].
//!
//! [`Reporter`]: crate::diagnostics::Reporter

pub mod doc;
pub mod types;

use crate::model::RefTarget;

pub use doc::{Captures, DocRenderer, Owner};
pub use types::TypeConverter;

/// Maps a resolved reference to the name other documentation should use for it.
pub trait TermResolver {
    /// `None` when the target exists but has no Lua counterpart.
    fn resolve_term(&self, target: &RefTarget) -> Option<String>;
}

/// Maps declared host types to Lua type names.
pub trait TypeNames {
    /// Dotted reference name of a documented type.
    fn type_name(&self, id: &str) -> Option<String>;

    /// Whether `id` is an enumeration (rendered as a string).
    fn is_enum(&self, id: &str) -> bool;
}

/// Traversal state, threaded by value through the tree walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCtx {
    /// Indentation, in spaces, for continuation lines.
    pub indent: usize,
    /// Inside a fenced code block.
    pub in_pre: bool,
}

impl RenderCtx {
    /// Context for the body of a list item.
    pub fn list_item(self) -> Self {
        Self {
            indent: self.indent + 3,
            ..self
        }
    }

    pub fn pre(self) -> Self {
        Self {
            in_pre: true,
            ..self
        }
    }
}
