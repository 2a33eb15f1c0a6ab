use thiserror::Error;

use crate::tree::NodeKey;

/// Why an insert was refused. The forest is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("field name is missing")]
    EmptyName { parent: Option<NodeKey> },

    #[error("field name \"{name}\" already exists at this level")]
    DuplicateName {
        name: String,
        parent: Option<NodeKey>,
    },

    #[error("parent field {0} no longer exists")]
    ParentNotFound(NodeKey),

    #[error("field {0} is not nested and cannot hold fields")]
    NotAContainer(NodeKey),
}

impl InsertError {
    pub fn parent(&self) -> Option<NodeKey> {
        match self {
            InsertError::EmptyName { parent } | InsertError::DuplicateName { parent, .. } => {
                *parent
            }
            InsertError::ParentNotFound(key) | InsertError::NotAContainer(key) => Some(*key),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Insert(#[from] InsertError),

    #[error("failed to render document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
