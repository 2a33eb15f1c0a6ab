//! Schema tree data model.
//!
//! Every node owns its children outright. The `parent_key` stored on a node
//! is a plain copy of the parent's key, used to compare naming scopes and to
//! derive display margins; it is never followed as a reference.

pub mod lookup;

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;
use smol_str::SmolStr;

pub use lookup::{find, find_mut, walk, Walk};

/// Identity of a node, unique for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeKey(u64);

impl NodeKey {
    pub const fn new(raw: u64) -> Self {
        NodeKey(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        f.write_str(buf.format(self.0))
    }
}

impl FromStr for NodeKey {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(NodeKey)
    }
}

/// The type a field is declared with.
///
/// # Examples
/// ```
/// use field_schema::FieldKind;
///
/// assert_eq!(FieldKind::from_label("nested"), Some(FieldKind::Nested));
/// assert_eq!(FieldKind::Number.as_label(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Number,
    String,
    Nested,
}

impl FieldKind {
    pub fn as_label(self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::Nested => "nested",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "number" => Some(FieldKind::Number),
            "string" => Some(FieldKind::String),
            "nested" => Some(FieldKind::Nested),
            _ => None,
        }
    }

    pub fn is_nested(self) -> bool {
        self == FieldKind::Nested
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A single schema field, leaf or container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub(crate) key: NodeKey,
    pub(crate) name: SmolStr,
    #[serde(rename = "fieldKind")]
    pub(crate) kind: FieldKind,
    pub(crate) children: Vec<Node>,
    pub(crate) parent_key: Option<NodeKey>,
    pub(crate) indent_level: u32,
}

impl Node {
    pub(crate) fn new(
        key: NodeKey,
        name: impl Into<SmolStr>,
        kind: FieldKind,
        parent_key: Option<NodeKey>,
        indent_level: u32,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            kind,
            children: Vec::new(),
            parent_key,
            indent_level,
        }
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn parent_key(&self) -> Option<NodeKey> {
        self.parent_key
    }

    /// Display margin: zero for roots, the parent's margin plus the session
    /// step for children.
    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn is_root(&self) -> bool {
        self.parent_key.is_none()
    }
}

/// Issues node keys. Keys start at zero and are never handed out twice, even
/// after the node that held one is removed.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    next: u64,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next);
        self.next += 1;
        key
    }

    /// The key the next call to [`KeyAllocator::next_key`] will return.
    pub fn peek(&self) -> NodeKey {
        NodeKey(self.next)
    }
}

/// In-place edit of an existing node. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub name: Option<SmolStr>,
    pub kind: Option<FieldKind>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none()
    }
}
