//! Host type descriptors.

use serde::Deserialize;

/// A host-language type, as seen at a parameter or return position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDesc {
    /// No value.
    #[default]
    Void,
    Number {
        #[serde(default)]
        repr: NumberRepr,
        /// The boxed (object) form of the numeric type.
        #[serde(default)]
        boxed: bool,
    },
    Boolean {
        #[serde(default)]
        boxed: bool,
    },
    String {
        #[serde(default)]
        repr: StringRepr,
    },
    /// The universal object type.
    Any,
    /// A wildcard or otherwise unbounded type argument.
    Wildcard,
    Array {
        element: Box<TypeDesc>,
    },
    /// A mapping. Missing arguments mean the host erased them.
    Map {
        #[serde(default)]
        key: Option<Box<TypeDesc>>,
        #[serde(default)]
        value: Option<Box<TypeDesc>>,
    },
    List {
        #[serde(default)]
        element: Option<Box<TypeDesc>>,
    },
    Optional {
        inner: Box<TypeDesc>,
    },
    /// A value coerced into `inner` by the runtime before the call.
    Coerced {
        inner: Box<TypeDesc>,
    },
    Union {
        alternatives: Vec<TypeDesc>,
    },
    /// The multi-value result marker.
    MultiResult,
    /// The dynamic argument list carrier.
    Arguments,
    /// Execution context or computer access, injected by the runtime.
    Context,
    /// Any other declared type.
    Named {
        id: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberRepr {
    #[default]
    Int,
    Long,
    Short,
    Byte,
    Float,
    Double,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringRepr {
    #[default]
    Text,
    Bytes,
    Enum,
}

impl TypeDesc {
    /// Strip optional and coerced wrappers.
    pub fn base(&self) -> &TypeDesc {
        match self {
            TypeDesc::Optional { inner } | TypeDesc::Coerced { inner } => inner.base(),
            other => other,
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            TypeDesc::Optional { .. } => true,
            TypeDesc::Coerced { inner } => inner.is_optional(),
            _ => false,
        }
    }

    /// Types which are injected by the runtime and never seen by Lua code.
    pub fn is_irrelevant(&self) -> bool {
        matches!(self, TypeDesc::Context)
    }

    /// Types which may hold arbitrary Lua values.
    pub fn is_any(&self) -> bool {
        match self {
            TypeDesc::MultiResult | TypeDesc::Arguments => true,
            TypeDesc::Array { element } => matches!(**element, TypeDesc::Any),
            _ => false,
        }
    }

    /// Types whose Lua representation is fully described by the signature.
    pub fn is_known(&self) -> bool {
        matches!(
            self.base(),
            TypeDesc::Number { boxed: false, .. }
                | TypeDesc::Boolean { boxed: false }
                | TypeDesc::String {
                    repr: StringRepr::Text
                }
        )
    }
}
