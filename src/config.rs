//! Run configuration, independent of how it was collected.

use std::path::PathBuf;

/// Vendor namespace for block tags, e.g. `@cc.module`.
pub const VENDOR_PREFIX: &str = "cc.";

/// File extension of the generated stubs.
pub const STUB_EXTENSION: &str = "lua";

/// Capability names which decide how a documented type is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Plain API modules.
    pub lua_api: String,
    /// Stateful-object modules.
    pub peripheral: String,
    /// Object-kind-dispatched modules.
    pub generic_source: String,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            lua_api: "dan200.computercraft.api.lua.ILuaAPI".to_string(),
            peripheral: "dan200.computercraft.api.peripheral.IPeripheral".to_string(),
            generic_source: "dan200.computercraft.api.lua.GenericSource".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the stubs are written to. Created if missing.
    pub output: PathBuf,
    /// `@source` paths are relative to this directory.
    pub project_root: PathBuf,
    pub capabilities: Capabilities,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            project_root: PathBuf::from("."),
            capabilities: Capabilities::default(),
        }
    }
}
