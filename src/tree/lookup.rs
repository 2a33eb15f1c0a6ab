use std::iter::FusedIterator;
use std::slice;

use smallvec::SmallVec;

use super::{Node, NodeKey};

/// Depth-first pre-order traversal of a forest.
///
/// Siblings are visited in storage order and each subtree is exhausted before
/// the next sibling. Yields `(depth, node)` with roots at depth zero.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: SmallVec<[(usize, slice::Iter<'a, Node>); 8]>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, next) = {
                let (depth, siblings) = self.stack.last_mut()?;
                (*depth, siblings.next())
            };
            match next {
                Some(node) => {
                    if !node.children.is_empty() {
                        self.stack.push((depth + 1, node.children.iter()));
                    }
                    return Some((depth, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}

pub fn walk(forest: &[Node]) -> Walk<'_> {
    let mut stack = SmallVec::new();
    stack.push((0, forest.iter()));
    Walk { stack }
}

/// Locate a node by key anywhere in the forest.
///
/// Absence is an ordinary outcome: the node may have been removed between the
/// caller capturing the key and asking for it.
pub fn find(forest: &[Node], key: NodeKey) -> Option<&Node> {
    let found = walk(forest).map(|(_, node)| node).find(|node| node.key == key);
    tracing::trace!(%key, found = found.is_some(), "lookup");
    found
}

pub fn find_mut(forest: &mut [Node], key: NodeKey) -> Option<&mut Node> {
    for node in forest.iter_mut() {
        if node.key == key {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, key) {
            return Some(found);
        }
    }
    None
}
