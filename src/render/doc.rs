//! Documentation trees to the Lua doc-comment dialect.
//!
//! Inline markup is translated to markdown, vendor block tags (`@cc.*`) to
//! their dialect equivalents. Parameter and return tags are not rendered
//! inline: they are captured for the caller, which interleaves them with type
//! information when composing a function stub.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::config::VENDOR_PREFIX;
use crate::diagnostics::{Level, Reporter, Subject};
use crate::hierarchy::TypeId;
use crate::inherit;
use crate::model::{AttrValue, Attribute, DocComment, DocNode, Reference};
use crate::program::{FnId, Program};
use crate::render::{RenderCtx, TermResolver};

/// The declaration whose documentation is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Type(TypeId),
    Fn(FnId),
}

/// Tags captured while rendering, rather than emitted.
#[derive(Debug, Default)]
pub struct Captures<'a> {
    /// A `@cc.param` or `@cc.tparam` tag was seen.
    pub has_param: bool,
    /// A `@cc.return` or `@cc.treturn` tag was seen.
    pub has_return: bool,
    /// `@param` descriptions, by parameter name.
    pub params: HashMap<String, &'a [DocNode]>,
    /// The `@return` description.
    pub returns: Option<&'a [DocNode]>,
}

pub struct DocRenderer<'a> {
    program: &'a Program,
    /// Switches to the ancestor while an inherited comment is rendered.
    owner: Cell<Owner>,
    /// Methods whose `{@inheritDoc}` is currently being expanded.
    inheriting: RefCell<Vec<FnId>>,
    resolver: &'a dyn TermResolver,
    reporter: &'a Reporter,
}

impl<'a> DocRenderer<'a> {
    pub fn new(
        program: &'a Program,
        owner: Owner,
        resolver: &'a dyn TermResolver,
        reporter: &'a Reporter,
    ) -> Self {
        Self {
            program,
            owner: Cell::new(owner),
            inheriting: RefCell::default(),
            resolver,
            reporter,
        }
    }

    /// Render a whole comment: the body, a newline, then the block tags.
    pub fn render_comment(&self, doc: &'a DocComment) -> (String, Captures<'a>) {
        let mut out = String::new();
        let mut captures = Captures::default();
        self.comment(doc, RenderCtx::default(), &mut out, &mut captures);
        (out, captures)
    }

    /// Render a fragment, such as a captured parameter description.
    pub fn render_nodes(&self, nodes: &'a [DocNode]) -> String {
        let mut out = String::new();
        self.walk(nodes, RenderCtx::default(), &mut out, &mut Captures::default());
        out
    }

    fn subject(&self) -> Subject {
        match self.owner.get() {
            Owner::Type(id) => self.program.type_subject(id),
            Owner::Fn(id) => self.program.fn_subject(id),
        }
    }

    fn report(&self, node: &DocNode, message: impl Into<String>) {
        self.reporter
            .report_node(Level::Error, &self.subject(), node.kind_name(), message);
    }

    fn comment(
        &self,
        doc: &'a DocComment,
        ctx: RenderCtx,
        out: &mut String,
        captures: &mut Captures<'a>,
    ) {
        self.walk(&doc.body, ctx, out, captures);
        out.push('\n');
        self.walk(&doc.tags, ctx, out, captures);
    }

    fn walk(
        &self,
        nodes: &'a [DocNode],
        ctx: RenderCtx,
        out: &mut String,
        captures: &mut Captures<'a>,
    ) {
        for node in nodes {
            self.node(node, ctx, out, captures);
        }
    }

    fn node(
        &self,
        node: &'a DocNode,
        ctx: RenderCtx,
        out: &mut String,
        captures: &mut Captures<'a>,
    ) {
        match node {
            DocNode::Text { body } | DocNode::Erroneous { body } => {
                emit_text(out, body, ctx, false)
            }
            DocNode::Code { body } => literal(out, body, ctx, true),
            DocNode::Literal { body } => literal(out, body, ctx, false),
            DocNode::Reference(reference) => self.reference(node, reference, out),
            DocNode::Link { reference, label } => {
                if !label.is_empty() {
                    out.push('[');
                    self.walk(label, ctx, out, captures);
                    out.push(']');
                }
                out.push_str("[`");
                self.reference(node, reference, out);
                out.push_str("`]");
            }
            DocNode::Element {
                name,
                attributes,
                children,
                self_closing,
            } => self.element(name, attributes, children, *self_closing, ctx, out, captures),
            DocNode::Entity { name } => {
                out.push('&');
                out.push_str(name);
                out.push(';');
            }
            DocNode::InheritDoc => self.inherit_doc(node, ctx, out, captures),
            DocNode::Hidden => out.push_str("@local\n"),
            DocNode::Param { name, description } => {
                captures.params.insert(name.clone(), description.as_slice());
            }
            DocNode::Return { description } => captures.returns = Some(description.as_slice()),
            DocNode::Throws { description } => {
                let hidden = matches!(
                    description.first(),
                    Some(DocNode::Text { body }) if body.starts_with("(hidden)")
                );
                if hidden {
                    return;
                }
                out.push_str("@throws ");
                self.walk(description, ctx, out, captures);
                out.push('\n');
            }
            DocNode::Deprecated { body } => {
                out.push_str("@deprecated ");
                self.walk(body, ctx, out, captures);
                out.push('\n');
            }
            DocNode::See { reference } => {
                let Some((first, rest)) = reference.split_first() else {
                    return;
                };
                out.push_str("@see ");
                self.node(first, ctx, out, captures);
                out.push(' ');
                self.walk(rest, ctx, out, captures);
                out.push('\n');
            }
            DocNode::BlockTag { name, content } => {
                self.block_tag(node, name, content, ctx, out, captures)
            }
            DocNode::Unsupported => self.report(node, "Unsupported documentation node"),
        }
    }

    fn reference(&self, node: &DocNode, reference: &Reference, out: &mut String) {
        let Some(target) = &reference.target else {
            self.report(node, "Cannot resolve reference.");
            out.push_str(&reference.signature);
            return;
        };

        match self.resolver.resolve_term(target) {
            Some(name) => out.push_str(&name),
            None => {
                self.report(
                    node,
                    format!("Cannot convert {} into a Lua reference.", reference.signature),
                );
                out.push_str(&reference.signature);
            }
        }
    }

    fn block_tag(
        &self,
        node: &DocNode,
        name: &str,
        content: &'a [DocNode],
        ctx: RenderCtx,
        out: &mut String,
        captures: &mut Captures<'a>,
    ) {
        let Some(actual) = name.strip_prefix(VENDOR_PREFIX) else {
            self.report(node, format!("Unsupported block tag @{name}"));
            return;
        };

        match actual {
            "param" | "tparam" => captures.has_param = true,
            "return" | "treturn" => captures.has_return = true,
            "module" => return,
            _ => {}
        }

        out.push('@');
        out.push_str(actual);
        // `@cc.tparam[opt] ...` keeps its modifier attached to the tag.
        if !matches!(content.first(), Some(DocNode::Text { body }) if body.starts_with('[')) {
            out.push(' ');
        }
        self.walk(content, ctx, out, captures);
        out.push('\n');
    }

    #[allow(clippy::too_many_arguments)]
    fn element(
        &self,
        name: &str,
        attributes: &[Attribute],
        children: &'a [DocNode],
        self_closing: bool,
        ctx: RenderCtx,
        out: &mut String,
        captures: &mut Captures<'a>,
    ) {
        match name {
            "pre" => {
                let indent = " ".repeat(ctx.indent);
                if out.is_empty() || out.ends_with('\n') {
                    out.push_str(&indent);
                }
                out.push_str("```lua");
                if !attributes.is_empty() {
                    let attrs: Vec<String> = attributes
                        .iter()
                        .map(|attr| match attr_text(&attr.value) {
                            Some(value) => format!("{}={}", attr.name, value),
                            None => attr.name.clone(),
                        })
                        .collect();
                    out.push_str(" {");
                    out.push_str(&attrs.join(" "));
                    out.push('}');
                }
                out.push('\n');
                out.push_str(&indent);
                self.walk(children, ctx.pre(), out, captures);
                out.push('\n');
                out.push_str(&indent);
                out.push_str("```");
            }
            "p" | "ul" => self.walk(children, ctx, out, captures),
            "li" => {
                out.push_str(" - ");
                self.walk(children, ctx.list_item(), out, captures);
            }
            "em" | "strong" if attributes.is_empty() => {
                let marker = if name == "em" { "*" } else { "**" };
                out.push_str(marker);
                self.walk(children, ctx, out, captures);
                out.push_str(marker);
            }
            _ => {
                out.push('<');
                out.push_str(name);
                for attr in attributes {
                    write_attribute(out, attr);
                }
                if self_closing {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                self.walk(children, ctx, out, captures);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }

    fn inherit_doc(
        &self,
        node: &DocNode,
        ctx: RenderCtx,
        out: &mut String,
        captures: &mut Captures<'a>,
    ) {
        let Owner::Fn(current) = self.owner.get() else {
            self.report(node, "Cannot resolve parent doc comment.");
            return;
        };
        // A hierarchy cycle can make two methods inherit from each other.
        let found = inherit::inherited_doc(self.program, current)
            .filter(|(ancestor, _)| !self.inheriting.borrow().contains(ancestor));
        let Some((ancestor, doc)) = found else {
            self.report(node, "Cannot resolve parent doc comment.");
            return;
        };

        self.inheriting.borrow_mut().push(current);
        self.owner.set(Owner::Fn(ancestor));
        self.comment(doc, ctx, out, captures);
        self.owner.set(Owner::Fn(current));
        self.inheriting.borrow_mut().pop();
    }
}

/// Append text, dropping the single leading space each continuation line
/// carries from the comment marker and re-indenting it to the current level.
fn emit_text(out: &mut String, body: &str, ctx: RenderCtx, strip_first: bool) {
    if !body.contains('\n') {
        out.push_str(body);
        return;
    }

    let indent = " ".repeat(ctx.indent);
    for (i, line) in body.split('\n').enumerate() {
        let line = if i > 0 || strip_first {
            line.strip_prefix(' ').unwrap_or(line)
        } else {
            line
        };
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }
}

fn literal(out: &mut String, body: &str, ctx: RenderCtx, code: bool) {
    // The fence already provides the code context.
    if ctx.in_pre {
        emit_text(out, body.trim(), ctx, true);
        return;
    }

    match body {
        "nil" | "true" | "false" => {
            out.push_str("[`");
            out.push_str(body);
            out.push_str("`]");
        }
        _ if code => {
            out.push('`');
            out.push_str(body);
            out.push('`');
        }
        _ => out.push_str(body),
    }
}

fn attr_text(value: &AttrValue) -> Option<&str> {
    match value {
        AttrValue::Empty => None,
        AttrValue::Double(s) | AttrValue::Single(s) | AttrValue::Unquoted(s) => Some(s),
    }
}

fn write_attribute(out: &mut String, attr: &Attribute) {
    out.push(' ');
    out.push_str(&attr.name);
    match &attr.value {
        AttrValue::Empty => {}
        AttrValue::Double(value) => {
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        AttrValue::Single(value) => {
            out.push_str("='");
            out.push_str(value);
            out.push('\'');
        }
        AttrValue::Unquoted(value) => {
            out.push('=');
            out.push_str(value);
        }
    }
}
