//! Metadata for Lua-callable methods.

use crate::program::{FnId, Program};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub id: FnId,
    /// The primary name followed by any aliases. Never empty.
    names: Vec<String>,
}

impl MethodInfo {
    /// Extract metadata for `id`, or `None` if it lacks the callable marker.
    pub fn of(program: &Program, id: FnId) -> Option<MethodInfo> {
        let method = &program.fn_decl(id).host;
        let marker = method.lua_function.as_ref()?;

        let names = match &marker.names {
            Some(names) if !names.is_empty() => names.clone(),
            _ => vec![method.name.clone()],
        };
        Some(MethodInfo { id, names })
    }

    pub fn name(&self) -> &str {
        &self.names[0]
    }

    /// Alternative names, all of which refer to [`MethodInfo::name`].
    pub fn aliases(&self) -> &[String] {
        &self.names[1..]
    }
}
