//! One editing session: the forest plus everything needed to mutate it.
//!
//! The presentation layer talks to a [`Session`] through [`Request`]s and
//! reads back the forest, the JSON document and any notifications raised.

use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::encode;
use crate::error::InsertError;
use crate::mutate::{self, InsertGate};
use crate::notify::Notification;
use crate::options::SessionOptions;
use crate::tree::{find, walk, FieldKind, KeyAllocator, Node, NodeKey, Patch};
use crate::validate::find_duplicates;
use crate::Result;

/// Inbound requests from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Insert {
        parent: Option<NodeKey>,
        kind: FieldKind,
        name: String,
    },
    Remove {
        key: NodeKey,
    },
    EditName {
        key: NodeKey,
        name: String,
    },
    EditKind {
        key: NodeKey,
        kind: FieldKind,
    },
}

#[derive(Debug, Default)]
pub struct Session {
    forest: Vec<Node>,
    keys: KeyAllocator,
    gate: InsertGate,
    options: SessionOptions,
    notifications: Vec<Notification>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn forest(&self) -> &[Node] {
        &self.forest
    }

    pub fn find(&self, key: NodeKey) -> Option<&Node> {
        find(&self.forest, key)
    }

    /// Number of nodes at every depth.
    pub fn len(&self) -> usize {
        walk(&self.forest).count()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Insert a field, returning the committed node.
    ///
    /// `Ok(None)` means another insert was already running on this session
    /// and this one was collapsed into it. After a commit every sibling group
    /// is re-checked for duplicate names; anything found is queued as a
    /// notification but the insert stands.
    pub fn insert(
        &mut self,
        parent: Option<NodeKey>,
        name: &str,
        kind: FieldKind,
    ) -> std::result::Result<Option<Node>, InsertError> {
        let Some(_ticket) = self.gate.try_acquire() else {
            tracing::debug!(?parent, name, "insert already in flight, collapsing");
            return Ok(None);
        };

        let node = mutate::insert(
            &mut self.forest,
            &mut self.keys,
            self.options.indent_step,
            parent,
            name,
            kind,
        )?;

        for duplicate in find_duplicates(&self.forest) {
            tracing::warn!(
                parent = ?duplicate.parent,
                name = duplicate.name.as_str(),
                "duplicate field name after insert"
            );
            self.notifications.push(Notification::from(&duplicate));
        }
        Ok(Some(node))
    }

    /// Remove a field and everything below it. Returns false if the key was
    /// not present.
    pub fn remove(&mut self, key: NodeKey) -> bool {
        if self.find(key).is_none() {
            tracing::debug!(%key, "remove target not found");
            return false;
        }
        self.forest = mutate::remove(std::mem::take(&mut self.forest), key);
        tracing::debug!(%key, "removed field");
        true
    }

    pub fn edit(&mut self, key: NodeKey, patch: Patch) -> bool {
        mutate::edit(&mut self.forest, key, patch)
    }

    pub fn rename(&mut self, key: NodeKey, name: impl Into<SmolStr>) -> bool {
        self.edit(key, Patch::new().with_name(name))
    }

    pub fn set_kind(&mut self, key: NodeKey, kind: FieldKind) -> bool {
        self.edit(key, Patch::new().with_kind(kind))
    }

    /// Run one request and return the notifications it raised.
    ///
    /// Refused inserts become error notifications, except a vanished parent,
    /// which is treated as a stale click and dropped quietly.
    pub fn dispatch(&mut self, request: Request) -> Vec<Notification> {
        let start = self.notifications.len();
        match request {
            Request::Insert { parent, kind, name } => {
                match self.insert(parent, &name, kind) {
                    Ok(_) => {}
                    Err(InsertError::ParentNotFound(key)) => {
                        tracing::debug!(%key, "insert under missing parent ignored");
                    }
                    Err(err) => self.notifications.push(Notification::from(&err)),
                }
            }
            Request::Remove { key } => {
                self.remove(key);
            }
            Request::EditName { key, name } => {
                self.rename(key, name);
            }
            Request::EditKind { key, kind } => {
                self.set_kind(key, kind);
            }
        }
        self.notifications.split_off(start)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn document(&self) -> Map<String, Value> {
        encode::to_document(&self.forest)
    }

    /// The document as JSON, indented per [`SessionOptions::json_indent`].
    pub fn document_json(&self) -> Result<String> {
        encode::to_string(&self.forest, self.options.json_indent)
    }

    /// The forest itself as JSON, for renderers that draw the editing rows.
    pub fn forest_json(&self) -> Result<String> {
        let mut out = Vec::new();
        encode::write_json(&mut out, &self.forest, self.options.json_indent)?;
        String::from_utf8(out).map_err(|err| {
            crate::Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })
    }

    pub fn outline(&self) -> String {
        encode::render_outline(&self.forest)
    }
}
