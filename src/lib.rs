//! Nested field schema editing core.
//!
//! A schema is a forest of named fields. Leaves are `number` or `string`
//! fields, `nested` fields own further fields. [`Session`] holds the forest
//! for one editing session and derives a JSON document mirroring it:
//!
//! ```
//! use field_schema::{FieldKind, Session};
//!
//! let mut session = Session::new();
//! let user = session.insert(None, "user", FieldKind::Nested)?.unwrap();
//! session.insert(Some(user.key()), "id", FieldKind::Number)?;
//! session.insert(None, "age", FieldKind::Number)?;
//!
//! assert_eq!(
//!     session.document_json()?,
//!     "{\n  \"user\": {\n    \"id\": \"number\"\n  },\n  \"age\": \"number\"\n}"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod constants;
pub mod encode;
pub mod error;
pub mod mutate;
pub mod notify;
pub mod options;
pub mod session;
pub mod tree;
pub mod validate;

use std::io::Write;

pub use crate::encode::{render_outline, to_document, to_value};
pub use crate::error::{Error, InsertError};
pub use crate::notify::{Notification, Severity};
pub use crate::options::{Indent, SessionOptions};
pub use crate::session::{Request, Session};
pub use crate::tree::{find, walk, FieldKind, KeyAllocator, Node, NodeKey, Patch};
pub use crate::validate::{find_duplicates, has_global_duplicate, has_local_duplicate, Duplicate};

pub type Result<T> = std::result::Result<T, Error>;

pub fn to_string(forest: &[Node]) -> Result<String> {
    to_string_with_indent(forest, Indent::default())
}

pub fn to_string_with_indent(forest: &[Node], indent: Indent) -> Result<String> {
    encode::to_string(forest, indent)
}

pub fn to_vec(forest: &[Node]) -> Result<Vec<u8>> {
    encode::to_vec(forest, Indent::default())
}

pub fn to_writer<W: Write>(writer: W, forest: &[Node]) -> Result<()> {
    to_writer_with_indent(writer, forest, Indent::default())
}

pub fn to_writer_with_indent<W: Write>(writer: W, forest: &[Node], indent: Indent) -> Result<()> {
    encode::to_writer(writer, forest, indent)
}
