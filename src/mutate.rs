//! Insert, remove and edit on a forest.
//!
//! These are the only functions that change the shape of a forest. They take
//! the key allocator and indent step explicitly; [`crate::Session`] bundles
//! them with the forest for a whole editing session.

use std::cell::Cell;

use crate::error::InsertError;
use crate::tree::{find_mut, FieldKind, KeyAllocator, Node, NodeKey, Patch};
use crate::validate::has_local_duplicate;

/// Busy flag collapsing overlapping insert triggers into one mutation.
///
/// This is not a lock: it only answers "is an insert already running on this
/// session". A second trigger while the first holds the ticket is dropped.
#[derive(Debug, Default)]
pub struct InsertGate {
    busy: Cell<bool>,
}

impl InsertGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<InsertTicket<'_>> {
        if self.busy.replace(true) {
            return None;
        }
        Some(InsertTicket { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Held for the duration of one insert; releases the gate on drop.
#[derive(Debug)]
pub struct InsertTicket<'a> {
    gate: &'a InsertGate,
}

impl Drop for InsertTicket<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
    }
}

/// Insert a field at the top level (`parent == None`) or under an existing
/// nested field, returning a copy of the committed node.
///
/// Roots must be named. A child may be left unnamed only when it is the first
/// child of its parent, which lets a fresh container start with a blank row
/// for the user to fill in.
pub fn insert(
    forest: &mut Vec<Node>,
    keys: &mut KeyAllocator,
    indent_step: u32,
    parent: Option<NodeKey>,
    name: &str,
    kind: FieldKind,
) -> Result<Node, InsertError> {
    match parent {
        None => insert_root(forest, keys, name, kind),
        Some(parent_key) => insert_child(forest, keys, indent_step, parent_key, name, kind),
    }
}

pub fn insert_root(
    forest: &mut Vec<Node>,
    keys: &mut KeyAllocator,
    name: &str,
    kind: FieldKind,
) -> Result<Node, InsertError> {
    if name.is_empty() {
        return Err(InsertError::EmptyName { parent: None });
    }
    if has_local_duplicate(forest, name, None) {
        return Err(InsertError::DuplicateName {
            name: name.to_string(),
            parent: None,
        });
    }

    let node = Node::new(keys.next_key(), name, kind, None, 0);
    tracing::debug!(key = %node.key, name, %kind, "inserted root field");
    forest.push(node.clone());
    Ok(node)
}

pub fn insert_child(
    forest: &mut [Node],
    keys: &mut KeyAllocator,
    indent_step: u32,
    parent_key: NodeKey,
    name: &str,
    kind: FieldKind,
) -> Result<Node, InsertError> {
    let parent = find_mut(forest, parent_key).ok_or(InsertError::ParentNotFound(parent_key))?;
    if !parent.kind.is_nested() {
        return Err(InsertError::NotAContainer(parent_key));
    }
    if name.is_empty() && !parent.children.is_empty() {
        return Err(InsertError::EmptyName {
            parent: Some(parent_key),
        });
    }
    if has_local_duplicate(&parent.children, name, Some(parent_key)) {
        return Err(InsertError::DuplicateName {
            name: name.to_string(),
            parent: Some(parent_key),
        });
    }

    let indent_level = parent.indent_level.saturating_add(indent_step);
    let node = Node::new(keys.next_key(), name, kind, Some(parent_key), indent_level);
    tracing::debug!(key = %node.key, parent = %parent_key, name, %kind, "inserted child field");
    parent.children.push(node.clone());
    Ok(node)
}

/// Drop the node with `key` together with its whole subtree.
///
/// Every sibling group is filtered and survivors are filtered recursively, so
/// no descendant of the removed node can be left behind. An unknown key
/// returns the forest as it was.
pub fn remove(forest: Vec<Node>, key: NodeKey) -> Vec<Node> {
    forest
        .into_iter()
        .filter(|node| node.key != key)
        .map(|mut node| {
            if !node.children.is_empty() {
                node.children = remove(std::mem::take(&mut node.children), key);
            }
            node
        })
        .collect()
}

/// Apply `patch` to the node with `key`. Returns false if there is no such
/// node.
///
/// Switching a nested field to a leaf kind keeps its children; they stay
/// reachable by key and reappear if the field is switched back.
pub fn edit(forest: &mut [Node], key: NodeKey, patch: Patch) -> bool {
    let Some(node) = find_mut(forest, key) else {
        tracing::debug!(%key, "edit target not found");
        return false;
    };
    if let Some(name) = patch.name {
        node.name = name;
    }
    if let Some(kind) = patch.kind {
        node.kind = kind;
    }
    tracing::debug!(%key, name = node.name.as_str(), kind = %node.kind, "edited field");
    true
}
