//! Property-based invariants for random insert/remove sequences.
//!
//! 1. Keys stay unique and every committed key is larger than all earlier ones.
//! 2. Every child's parent key resolves to a node that owns it.
//! 3. No sibling group ever holds a name twice when names are only set by insert.
//! 4. Leaves never own children when kinds are never edited.
//! 5. Removing a node removes exactly that node and its descendants.
//! 6. Rendering the document twice gives the same bytes.

use std::collections::HashSet;

use field_schema::{find, has_global_duplicate, walk, FieldKind, Node, NodeKey, Session};
use proptest::prelude::*;
use proptest::sample::Index;

const NAMES: &[&str] = &["a", "b", "c", "id", ""];

#[derive(Debug, Clone)]
enum Op {
    Insert {
        parent: Option<Index>,
        kind: FieldKind,
        name: &'static str,
    },
    Remove(Index),
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        1 => Just(FieldKind::Number),
        1 => Just(FieldKind::String),
        2 => Just(FieldKind::Nested),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (
            proptest::option::weighted(0.8, any::<Index>()),
            kind_strategy(),
            proptest::sample::select(NAMES),
        )
            .prop_map(|(parent, kind, name)| Op::Insert { parent, kind, name }),
        1 => any::<Index>().prop_map(Op::Remove),
    ]
}

fn keys_of(forest: &[Node]) -> Vec<NodeKey> {
    walk(forest).map(|(_, node)| node.key()).collect()
}

fn pick(keys: &[NodeKey], index: &Index) -> NodeKey {
    if keys.is_empty() {
        // Nothing to pick: aim at a key that does not exist.
        NodeKey::new(u64::MAX)
    } else {
        keys[index.index(keys.len())]
    }
}

fn run(ops: &[Op]) -> (Session, Vec<NodeKey>) {
    let mut session = Session::new();
    let mut committed = Vec::new();
    for op in ops {
        let keys = keys_of(session.forest());
        match op {
            Op::Insert { parent, kind, name } => {
                let parent = parent.as_ref().map(|index| pick(&keys, index));
                if let Ok(Some(node)) = session.insert(parent, name, *kind) {
                    committed.push(node.key());
                }
            }
            Op::Remove(index) => {
                session.remove(pick(&keys, index));
            }
        }
    }
    (session, committed)
}

fn check_structure(forest: &[Node]) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for (_, node) in walk(forest) {
        prop_assert!(seen.insert(node.key()), "duplicate key {}", node.key());
        if !node.kind().is_nested() {
            prop_assert!(node.children().is_empty(), "leaf {} has children", node.key());
        }
        if let Some(parent_key) = node.parent_key() {
            let parent = find(forest, parent_key);
            prop_assert!(parent.is_some(), "orphan {} under {}", node.key(), parent_key);
            let parent = parent.unwrap();
            prop_assert!(parent.children().iter().any(|child| child.key() == node.key()));
            prop_assert_eq!(node.indent_level(), parent.indent_level() + 30);
        } else {
            prop_assert!(forest.iter().any(|root| root.key() == node.key()));
            prop_assert_eq!(node.indent_level(), 0);
        }
    }
    prop_assert!(!has_global_duplicate(forest));
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Structural invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn random_sequences_keep_the_tree_consistent(ops in proptest::collection::vec(op_strategy(), 0..60)) {
        let (session, committed) = run(&ops);
        check_structure(session.forest())?;
        prop_assert!(committed.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Subtree removal completeness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn remove_drops_exactly_the_subtree(
        ops in proptest::collection::vec(op_strategy(), 1..60),
        target in any::<Index>(),
    ) {
        let (mut session, _) = run(&ops);
        let keys = keys_of(session.forest());
        prop_assume!(!keys.is_empty());
        let target = pick(&keys, &target);

        let doomed: HashSet<NodeKey> = {
            let node = session.find(target).unwrap();
            let mut doomed: HashSet<NodeKey> = keys_of(node.children()).into_iter().collect();
            doomed.insert(target);
            doomed
        };

        prop_assert!(session.remove(target));
        let remaining: HashSet<NodeKey> = keys_of(session.forest()).into_iter().collect();
        let expected: HashSet<NodeKey> = keys.into_iter().filter(|key| !doomed.contains(key)).collect();
        prop_assert_eq!(remaining, expected);
        check_structure(session.forest())?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Idempotent serialization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rendering_is_idempotent(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let (session, _) = run(&ops);
        let first = session.document_json().unwrap();
        let second = session.document_json().unwrap();
        prop_assert_eq!(first, second);
    }
}
