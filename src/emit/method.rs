//! Function stubs: doc comment, signature and alias lines.

use crate::diagnostics::Subject;
use crate::emit::names::Names;
use crate::emit::Emitter;
use crate::extract::{ClassInfo, Classification, MethodInfo};
use crate::model::{Param, TypeDesc};
use crate::program::FnId;
use crate::render::{Captures, DocRenderer, Owner, TypeConverter};

/// A rendered function, ready to be placed in any stub it applies to.
#[derive(Debug, Clone)]
pub struct EmittedMethod {
    pub id: FnId,
    pub info: MethodInfo,
    /// The full `--[[- ... ]]` block.
    pub doc_comment: String,
    /// Comma-separated parameter names.
    pub signature: String,
}

impl EmittedMethod {
    /// Append this function, qualified with `prefix`, to a stub.
    pub fn emit(&self, prefix: &str, out: &mut String) {
        let name = self.info.name();
        out.push_str(&self.doc_comment);
        out.push_str(&format!("function {prefix}{name}({}) end\n", self.signature));
        for alias in self.info.aliases() {
            out.push_str(&format!("{prefix}{alias} = {prefix}{name}\n"));
        }
    }
}

impl Emitter<'_> {
    pub(crate) fn method(&self, class: Option<&ClassInfo>, info: &MethodInfo) -> EmittedMethod {
        let program = self.program;
        let decl = program.fn_decl(info.id);
        let method = &decl.host;
        let subject = program.fn_subject(info.id);

        let names = Names::new(program, self.decls, class.map(|c| c.id));
        let docs = DocRenderer::new(program, Owner::Fn(info.id), &names, self.reporter);
        let types = TypeConverter::new(&names, self.reporter, &subject);

        let mut out = String::from("--[[- ");
        let (text, captures) = match &method.doc {
            Some(doc) => docs.render_comment(doc),
            None => (String::new(), Captures::default()),
        };
        out.push_str(&text);
        out.push('\n');
        out.push_str(&self.source_tag(&method.source));

        let signature = if captures.has_param {
            if !method
                .params
                .iter()
                .any(|p| !p.ty.is_irrelevant() && !p.ty.is_known())
            {
                self.reporter.warning(
                    &subject,
                    "Method uses @cc.tparam, but has no arbitrary arguments.",
                );
            }
            String::new()
        } else {
            let generic = class.is_some_and(|c| c.classification == Classification::GenericSource);
            // The first argument of a generic method is the object being dispatched on.
            let skip = usize::from(generic && method.is_static);
            method
                .params
                .iter()
                .skip(skip)
                .filter_map(|param| self.param(param, &captures, &docs, &types, &subject, &mut out))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let returns = &method.returns;
        if !captures.has_return && returns.is_any() {
            self.reporter.warning(
                &subject,
                "Method returns an arbitrary object but has no @cc.return tag.",
            );
        } else if captures.has_return && returns.is_known() {
            self.reporter
                .warning(&subject, "Method has a @cc.return but returns a known type.");
        }

        if !captures.has_return && *returns != TypeDesc::Void {
            out.push_str("@treturn ");
            out.push_str(&types.convert(returns));
            if method.nullable || returns.is_optional() {
                out.push_str("|nil");
            }
            if let Some(description) = captures.returns {
                out.push(' ');
                out.push_str(&docs.render_nodes(description));
            }
            out.push('\n');
        }

        out.push_str("]]\n");

        EmittedMethod {
            id: info.id,
            info: info.clone(),
            doc_comment: out,
            signature,
        }
    }

    /// Write the `@tparam` line for `param`, returning its name in the signature.
    fn param<'a>(
        &self,
        param: &Param,
        captures: &Captures<'a>,
        docs: &DocRenderer<'a>,
        types: &TypeConverter<'_>,
        subject: &Subject,
        out: &mut String,
    ) -> Option<String> {
        let ty = &param.ty;
        if ty.is_irrelevant() {
            return None;
        }

        if ty.is_any() {
            self.reporter.warning(
                subject,
                "Method has a dynamic argument but has no @cc.param tag.",
            );
            return Some("...".to_string());
        }

        let name = display_name(&param.name);
        out.push_str("@tparam");
        if ty.is_optional() {
            out.push_str("[opt]");
        }
        out.push(' ');
        out.push_str(&types.convert(ty));
        out.push(' ');
        out.push_str(name);
        if let Some(description) = captures.params.get(&param.name).copied() {
            out.push(' ');
            out.push_str(&docs.render_nodes(description));
        }
        out.push('\n');
        Some(name.to_string())
    }
}

/// Strip the `Arg`/`A` suffix used to avoid shadowing in host code.
fn display_name(name: &str) -> &str {
    name.strip_suffix("Arg")
        .or_else(|| name.strip_suffix('A'))
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(display_name("x"), "x");
        assert_eq!(display_name("sideArg"), "side");
        assert_eq!(display_name("modeA"), "mode");
        assert_eq!(display_name("A"), "A");
        assert_eq!(display_name("Arg"), "Arg");
    }
}
