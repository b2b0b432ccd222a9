//! Host type descriptors to Lua type expressions.

use crate::diagnostics::{Reporter, Subject};
use crate::model::TypeDesc;
use crate::render::TypeNames;

pub struct TypeConverter<'a> {
    names: &'a dyn TypeNames,
    reporter: &'a Reporter,
    subject: &'a Subject,
}

impl<'a> TypeConverter<'a> {
    pub fn new(names: &'a dyn TypeNames, reporter: &'a Reporter, subject: &'a Subject) -> Self {
        Self {
            names,
            reporter,
            subject,
        }
    }

    /// Render `ty`. Unrepresentable types are reported and contribute nothing.
    pub fn convert(&self, ty: &TypeDesc) -> String {
        let mut out = String::new();
        self.write(ty, &mut out);
        out
    }

    fn write(&self, ty: &TypeDesc, out: &mut String) {
        match ty {
            TypeDesc::Optional { inner } | TypeDesc::Coerced { inner } => self.write(inner, out),
            TypeDesc::Union { alternatives } => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    self.write(alt, out);
                }
            }
            TypeDesc::Wildcard | TypeDesc::Any => out.push_str("any"),
            TypeDesc::Number { .. } => out.push_str("number"),
            TypeDesc::Boolean { .. } => out.push_str("boolean"),
            TypeDesc::String { .. } => out.push_str("string"),
            TypeDesc::MultiResult | TypeDesc::Arguments => out.push_str("any..."),
            TypeDesc::Array { element } => {
                if matches!(**element, TypeDesc::Any) {
                    out.push_str("any...");
                } else {
                    self.sequence(element, out);
                }
            }
            TypeDesc::Map { key, value } => {
                let key = type_arg(key);
                let value = type_arg(value);
                if key.is_none() && value.is_none() {
                    out.push_str("table");
                    return;
                }
                out.push_str("{ [");
                self.write_or_any(key, out);
                out.push_str("] = ");
                self.write_or_any(value, out);
                out.push_str(" }");
            }
            TypeDesc::List { element } => match type_arg(element) {
                Some(element) => self.sequence(element, out),
                None => out.push_str("table"),
            },
            TypeDesc::Named { id } => {
                if self.names.is_enum(id) {
                    out.push_str("string");
                } else if let Some(name) = self.names.type_name(id) {
                    out.push_str(&name);
                } else {
                    self.unsupported(id);
                }
            }
            TypeDesc::Void | TypeDesc::Context => self.unsupported(&format!("{ty:?}")),
        }
    }

    fn sequence(&self, element: &TypeDesc, out: &mut String) {
        out.push_str("{ ");
        self.write(element, out);
        out.push_str("... }");
    }

    fn write_or_any(&self, ty: Option<&TypeDesc>, out: &mut String) {
        match ty {
            Some(ty) => self.write(ty, out),
            None => out.push_str("any"),
        }
    }

    fn unsupported(&self, what: &str) {
        self.reporter
            .error(self.subject, format!("Cannot handle type {what}"));
    }
}

/// A type argument, treating wildcards like erased arguments.
fn type_arg(arg: &Option<Box<TypeDesc>>) -> Option<&TypeDesc> {
    arg.as_deref().filter(|t| !matches!(t, TypeDesc::Wildcard))
}
