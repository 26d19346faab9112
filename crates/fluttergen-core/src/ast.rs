//! Design tree model for serialized screens.
//!
//! A screen is serialized as a JSON object keyed by node id. The node with id
//! [`ROOT_ID`] is the root of the tree and every node lists its children by id.
//! Traversal is strictly top-down through those child lists; the `parent`
//! back-reference is kept for information only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Id of the root node of every screen tree.
pub const ROOT_ID: &str = "ROOT";

/// The kind of a design node.
///
/// The set of kinds is closed; any tag the design tool emits that is not
/// listed here is carried as [`NodeKind::Unknown`] so compilation never fails
/// on an unfamiliar element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Container,
    Text,
    Button,
    Input,
    Checkbox,
    Image,
    Table,
    Unknown(String),
}

impl NodeKind {
    /// Resolve a node kind from the design tool's type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Container" => Self::Container,
            "Text" => Self::Text,
            "Button" => Self::Button,
            "Input" => Self::Input,
            "Checkbox" => Self::Checkbox,
            "Image" => Self::Image,
            "Table" => Self::Table,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A single property value.
///
/// Design tools emit scalars; anything else (null, arrays, objects) is kept as
/// [`PropValue::Other`] and treated as absent by every converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as the design tool sees it: empty strings, zero, `false`
    /// and null are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Bool(b) => *b,
            PropValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PropValue::Text(s) => !s.is_empty(),
            PropValue::Other(value) => !value.is_null(),
        }
    }

    /// Render the value as display text.
    pub fn to_display_string(&self) -> String {
        match self {
            PropValue::Bool(b) => b.to_string(),
            PropValue::Number(n) => number_text(*n),
            PropValue::Text(s) => s.clone(),
            PropValue::Other(_) => String::new(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

/// Format a number without a trailing `.0` when it is integral.
pub fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Properties of a node, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(IndexMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Get a property if it holds a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// Display text of a truthy property, or `default`.
    pub fn text_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(value) if value.is_truthy() => value.to_display_string(),
            _ => default.to_string(),
        }
    }

    /// The first truthy property among `keys`.
    pub fn first_truthy(&self, keys: &[&str]) -> Option<&PropValue> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| value.is_truthy())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One element of a screen's design tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Whether the design tool lets this node accept drops. Informational.
    pub is_canvas: bool,
    pub props: Props,
    /// Child ids in rendering order.
    pub children: Vec<String>,
    pub parent: Option<String>,
    pub display_name: Option<String>,
}

impl Node {
    /// Create a new node with no props and no children.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            is_canvas: false,
            props: Props::new(),
            children: Vec::new(),
            parent: None,
            display_name: None,
        }
    }

    /// Add a property.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Append a child id.
    pub fn with_child(mut self, id: impl Into<String>) -> Self {
        self.children.push(id.into());
        self
    }
}

/// Node type tag as serialized: either `{ "resolvedName": "Text" }` or a bare tag.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawType {
    Resolved {
        #[serde(rename = "resolvedName")]
        resolved_name: String,
    },
    Plain(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type", default)]
    node_type: Option<RawType>,
    #[serde(default)]
    is_canvas: Option<bool>,
    #[serde(default)]
    props: Option<Props>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    nodes: Option<Vec<String>>,
    #[serde(default)]
    parent: Option<String>,
}

impl RawNode {
    fn into_node(self, id: String) -> Node {
        let kind = match self.node_type {
            Some(RawType::Resolved { resolved_name }) => NodeKind::from_tag(&resolved_name),
            Some(RawType::Plain(tag)) => NodeKind::from_tag(&tag),
            None => NodeKind::Unknown(String::new()),
        };
        Node {
            id,
            kind,
            is_canvas: self.is_canvas.unwrap_or(false),
            props: self.props.unwrap_or_default(),
            children: self.nodes.unwrap_or_default(),
            parent: self.parent,
            display_name: self.display_name,
        }
    }
}

/// A screen's nodes, indexed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTree {
    nodes: IndexMap<String, Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a serialized design document.
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        let raw: IndexMap<String, RawNode> = serde_json::from_str(source)?;
        let nodes = raw
            .into_iter()
            .map(|(id, node)| (id.clone(), node.into_node(id)))
            .collect();
        Ok(Self { nodes })
    }

    /// Insert a node, replacing any node with the same id.
    pub fn insert(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Add a node, builder style.
    pub fn with_node(mut self, node: Node) -> Self {
        self.insert(node);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The root node, if the document has one.
    pub fn root(&self) -> Option<&Node> {
        self.get(ROOT_ID)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}
