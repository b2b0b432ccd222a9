//! Documentation comment trees.

use serde::Deserialize;

/// A parsed documentation comment: the main description followed by its block
/// tags (`@param`, `@return`, `@cc.module`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocComment {
    #[serde(default)]
    pub body: Vec<DocNode>,
    #[serde(default)]
    pub tags: Vec<DocNode>,
}

impl DocComment {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.tags.is_empty()
    }

    /// Find the first vendor block tag with the given name.
    pub fn block_tag(&self, name: &str) -> Option<&[DocNode]> {
        self.tags.iter().find_map(|tag| match tag {
            DocNode::BlockTag { name: n, content } if n == name => Some(content.as_slice()),
            _ => None,
        })
    }

    pub fn is_hidden(&self) -> bool {
        self.tags.iter().any(|tag| matches!(tag, DocNode::Hidden))
    }
}

/// One node of a documentation tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocNode {
    Text {
        body: String,
    },
    /// Text the host parser could not make sense of; kept verbatim.
    Erroneous {
        body: String,
    },
    /// `{@code ...}`
    Code {
        body: String,
    },
    /// `{@literal ...}`
    Literal {
        body: String,
    },
    Reference(Reference),
    /// `{@link ref label}`
    Link {
        reference: Reference,
        #[serde(default)]
        label: Vec<DocNode>,
    },
    /// An inline markup element and its children.
    Element {
        name: String,
        #[serde(default)]
        attributes: Vec<Attribute>,
        #[serde(default)]
        children: Vec<DocNode>,
        #[serde(default)]
        self_closing: bool,
    },
    /// A character entity such as `&amp;`.
    Entity {
        name: String,
    },
    /// `{@inheritDoc}`
    InheritDoc,
    /// `@hidden`
    Hidden,
    Param {
        name: String,
        #[serde(default)]
        description: Vec<DocNode>,
    },
    Return {
        #[serde(default)]
        description: Vec<DocNode>,
    },
    Throws {
        #[serde(default)]
        description: Vec<DocNode>,
    },
    Deprecated {
        #[serde(default)]
        body: Vec<DocNode>,
    },
    /// `@see ref description...`; the first node is the reference.
    See {
        #[serde(default)]
        reference: Vec<DocNode>,
    },
    /// Any block tag the host does not know natively, e.g. `@cc.usage`.
    BlockTag {
        name: String,
        #[serde(default)]
        content: Vec<DocNode>,
    },
    /// A node kind this version does not understand.
    #[serde(other)]
    Unsupported,
}

impl DocNode {
    /// Short name of the node kind, used to locate diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DocNode::Text { .. } => "text",
            DocNode::Erroneous { .. } => "erroneous",
            DocNode::Code { .. } => "code",
            DocNode::Literal { .. } => "literal",
            DocNode::Reference(_) => "reference",
            DocNode::Link { .. } => "link",
            DocNode::Element { .. } => "element",
            DocNode::Entity { .. } => "entity",
            DocNode::InheritDoc => "inheritDoc",
            DocNode::Hidden => "hidden",
            DocNode::Param { .. } => "param",
            DocNode::Return { .. } => "return",
            DocNode::Throws { .. } => "throws",
            DocNode::Deprecated { .. } => "deprecated",
            DocNode::See { .. } => "see",
            DocNode::BlockTag { .. } => "block tag",
            DocNode::Unsupported => "unsupported",
        }
    }
}

/// A symbol reference, as written and as resolved by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reference {
    /// The reference as written in the source, e.g. `Foo#bar`.
    pub signature: String,
    /// `None` when the host could not resolve the symbol.
    #[serde(default)]
    pub target: Option<RefTarget>,
}

/// The declaration a reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefTarget {
    Type { id: String },
    Method { owner: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: AttrValue,
}

/// An attribute value, remembering how it was quoted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "quote", content = "text", rename_all = "snake_case")]
pub enum AttrValue {
    #[default]
    Empty,
    Double(String),
    Single(String),
    Unquoted(String),
}

/// Concatenate the bodies of the text nodes in `nodes`.
pub fn plain_text(nodes: &[DocNode]) -> String {
    nodes
        .iter()
        .filter_map(|node| match node {
            DocNode::Text { body } => Some(body.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tagged_nodes() {
        let node: DocNode = serde_json::from_value(json!({
            "kind": "element",
            "name": "li",
            "children": [{ "kind": "text", "body": "hi" }]
        }))
        .unwrap();
        assert_eq!(
            node,
            DocNode::Element {
                name: "li".into(),
                attributes: vec![],
                children: vec![DocNode::Text { body: "hi".into() }],
                self_closing: false,
            }
        );
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let node: DocNode = serde_json::from_value(json!({ "kind": "summary" })).unwrap();
        assert_eq!(node, DocNode::Unsupported);
    }

    #[test]
    fn attribute_quoting() {
        let attr: Attribute = serde_json::from_value(json!({
            "name": "class",
            "value": { "quote": "single", "text": "x" }
        }))
        .unwrap();
        assert_eq!(attr.value, AttrValue::Single("x".into()));
    }

    #[test]
    fn finds_block_tag() {
        let doc: DocComment = serde_json::from_value(json!({
            "tags": [
                { "kind": "hidden" },
                { "kind": "block_tag", "name": "cc.module", "content": [{ "kind": "text", "body": "fs" }] }
            ]
        }))
        .unwrap();
        assert_eq!(plain_text(doc.block_tag("cc.module").unwrap()), "fs");
        assert!(doc.is_hidden());
        assert!(doc.block_tag("cc.usage").is_none());
    }
}
