use field_schema::{
    find, walk, FieldKind, InsertError, Node, NodeKey, Notification, Request, Session,
};
use rstest::{fixture, rstest};

fn insert_ok(session: &mut Session, parent: Option<NodeKey>, name: &str, kind: FieldKind) -> Node {
    session
        .insert(parent, name, kind)
        .unwrap_or_else(|err| panic!("insert failed: {err}"))
        .expect("insert collapsed")
}

/// `user { id, profile { bio } }`, `age`
#[fixture]
fn populated() -> Session {
    let mut session = Session::new();
    let user = insert_ok(&mut session, None, "user", FieldKind::Nested);
    insert_ok(&mut session, Some(user.key()), "id", FieldKind::Number);
    let profile = insert_ok(&mut session, Some(user.key()), "profile", FieldKind::Nested);
    insert_ok(&mut session, Some(profile.key()), "bio", FieldKind::String);
    insert_ok(&mut session, None, "age", FieldKind::Number);
    session
}

#[rstest]
fn keys_are_unique_and_increasing(populated: Session) {
    let keys: Vec<u64> = walk(populated.forest()).map(|(_, node)| node.key().get()).collect();
    assert_eq!(keys, vec![0, 1, 2, 3, 4]);
}

#[rstest]
fn parent_keys_and_margins_follow_the_tree(populated: Session) {
    for (depth, node) in walk(populated.forest()) {
        assert_eq!(node.indent_level(), 30 * depth as u32, "{}", node.name());
        match node.parent_key() {
            None => assert_eq!(depth, 0),
            Some(parent) => {
                let parent = find(populated.forest(), parent).expect("parent resolves");
                assert!(parent.children().iter().any(|child| child.key() == node.key()));
            }
        }
    }
}

#[rstest]
fn removing_a_branch_drops_its_descendants(mut populated: Session) {
    assert!(populated.remove(NodeKey::new(2)));
    for gone in [2, 3] {
        assert!(populated.find(NodeKey::new(gone)).is_none());
    }
    for kept in [0, 1, 4] {
        assert!(populated.find(NodeKey::new(kept)).is_some());
    }
    assert_eq!(populated.len(), 3);
}

#[rstest]
fn removing_unknown_key_changes_nothing(mut populated: Session) {
    let before = populated.forest().to_vec();
    assert!(!populated.remove(NodeKey::new(99)));
    assert_eq!(populated.forest(), before.as_slice());
}

#[rstest]
fn local_duplicate_is_rejected_and_forest_unchanged(mut populated: Session) {
    let before = populated.forest().to_vec();
    let err = populated
        .insert(Some(NodeKey::new(0)), "id", FieldKind::String)
        .unwrap_err();
    assert_eq!(
        err,
        InsertError::DuplicateName {
            name: "id".to_string(),
            parent: Some(NodeKey::new(0)),
        }
    );
    assert_eq!(populated.forest(), before.as_slice());
}

#[rstest]
fn same_name_in_another_branch_is_accepted(mut populated: Session) {
    // "id" already exists under "user"; "profile" is a separate scope.
    let node = insert_ok(&mut populated, Some(NodeKey::new(2)), "id", FieldKind::Number);
    assert_eq!(node.parent_key(), Some(NodeKey::new(2)));
    assert!(populated.take_notifications().is_empty());
}

#[rstest]
fn top_level_empty_name_is_refused() {
    let mut session = Session::new();
    assert_eq!(
        session.insert(None, "", FieldKind::Number),
        Err(InsertError::EmptyName { parent: None })
    );
}

#[rstest]
fn first_child_of_empty_container_may_be_blank() {
    let mut session = Session::new();
    let user = insert_ok(&mut session, None, "user", FieldKind::Nested);
    let blank = insert_ok(&mut session, Some(user.key()), "", FieldKind::Number);
    assert_eq!(blank.name(), "");
    assert!(matches!(
        session.insert(Some(user.key()), "", FieldKind::Number),
        Err(InsertError::EmptyName { .. })
    ));
    assert_eq!(session.document_json().unwrap(), "{\n  \"user\": {\n    \"\": \"number\"\n  }\n}");
}

#[rstest]
fn serialization_is_idempotent(populated: Session) {
    let first = populated.document_json().unwrap();
    let second = populated.document_json().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "{\n  \"user\": {\n    \"id\": \"number\",\n    \"profile\": {\n      \"bio\": \"string\"\n    }\n  },\n  \"age\": \"number\"\n}"
    );
}

#[rstest]
fn kind_edit_keeps_hidden_children(mut populated: Session) {
    assert!(populated.set_kind(NodeKey::new(2), FieldKind::String));
    assert_eq!(
        populated.document(),
        serde_json::json!({"user": {"id": "number", "profile": "string"}, "age": "number"})
            .as_object()
            .cloned()
            .unwrap()
    );
    // The child is still there and comes back with the kind.
    assert!(populated.find(NodeKey::new(3)).is_some());
    assert!(populated.set_kind(NodeKey::new(2), FieldKind::Nested));
    assert_eq!(populated.document()["user"]["profile"]["bio"], "string");
}

#[rstest]
fn dispatch_covers_every_request(mut populated: Session) {
    let notes = populated.dispatch(Request::Insert {
        parent: None,
        kind: FieldKind::Number,
        name: "age".to_string(),
    });
    assert_eq!(
        notes,
        vec![Notification::error("field name \"age\" already exists at this level")]
    );

    populated.dispatch(Request::EditName {
        key: NodeKey::new(4),
        name: "years".to_string(),
    });
    populated.dispatch(Request::EditKind {
        key: NodeKey::new(4),
        kind: FieldKind::String,
    });
    populated.dispatch(Request::Remove {
        key: NodeKey::new(0),
    });
    assert_eq!(populated.document_json().unwrap(), "{\n  \"years\": \"string\"\n}");
}

#[rstest]
fn leaf_cannot_hold_fields(mut populated: Session) {
    assert_eq!(
        populated.insert(Some(NodeKey::new(4)), "x", FieldKind::Number),
        Err(InsertError::NotAContainer(NodeKey::new(4)))
    );
}
