//! Field name uniqueness checks.
//!
//! Names only have to be unique within a sibling group: the direct children
//! of one node, or the roots of the forest. Two leaves in different branches
//! may share a name.

use std::collections::HashSet;

use smol_str::SmolStr;

use crate::tree::{walk, Node, NodeKey};

/// A name that appears more than once inside a single sibling group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    /// Owner of the sibling group, `None` for the roots.
    pub parent: Option<NodeKey>,
    pub name: SmolStr,
}

/// True if a node in `siblings` belonging to the `parent_key` scope already
/// uses `candidate`.
///
/// Siblings whose recorded parent differs from `parent_key` never count, even
/// if they were passed in the same slice.
pub fn has_local_duplicate(siblings: &[Node], candidate: &str, parent_key: Option<NodeKey>) -> bool {
    siblings
        .iter()
        .any(|sibling| sibling.parent_key == parent_key && sibling.name.as_str() == candidate)
}

/// True if any sibling group in the forest holds the same name twice.
pub fn has_global_duplicate(forest: &[Node]) -> bool {
    sibling_groups(forest).any(|(_, group)| first_duplicate(group).is_some())
}

/// Every duplicated name, reported once per sibling group, in traversal order.
pub fn find_duplicates(forest: &[Node]) -> Vec<Duplicate> {
    let mut found = Vec::new();
    for (parent, group) in sibling_groups(forest) {
        let mut seen = HashSet::with_capacity(group.len());
        let mut reported = HashSet::new();
        for node in group {
            let name = node.name.as_str();
            if !seen.insert(name) && reported.insert(name) {
                found.push(Duplicate {
                    parent,
                    name: node.name.clone(),
                });
            }
        }
    }
    found
}

fn first_duplicate(group: &[Node]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(group.len());
    group
        .iter()
        .map(|node| node.name.as_str())
        .find(|name| !seen.insert(*name))
}

fn sibling_groups(forest: &[Node]) -> impl Iterator<Item = (Option<NodeKey>, &[Node])> {
    std::iter::once((None, forest)).chain(
        walk(forest)
            .filter(|(_, node)| !node.children.is_empty())
            .map(|(_, node)| (Some(node.key), node.children.as_slice())),
    )
}
