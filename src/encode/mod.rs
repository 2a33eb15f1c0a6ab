mod writer;

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::OUTLINE_INDENT;
use crate::error::Error;
use crate::options::Indent;
use crate::tree::Node;
use crate::Result;

/// Build the nested document for a forest.
///
/// Leaves become `name: "<kind>"`, nested fields become `name: { ... }` with
/// their children merged in order. When two siblings share a name the later
/// one replaces the earlier value in place; key order otherwise follows
/// insertion order.
///
/// # Examples
/// ```
/// use field_schema::{to_document, FieldKind, Session};
/// use serde_json::json;
///
/// let mut session = Session::new();
/// let user = session.insert(None, "user", FieldKind::Nested)?.unwrap();
/// session.insert(Some(user.key()), "id", FieldKind::Number)?;
///
/// let document = to_document(session.forest());
/// assert_eq!(serde_json::Value::Object(document), json!({"user": {"id": "number"}}));
/// # Ok::<(), field_schema::InsertError>(())
/// ```
pub fn to_document(forest: &[Node]) -> Map<String, Value> {
    let mut document = Map::new();
    for node in forest {
        merge_node(&mut document, node);
    }
    document
}

pub fn to_value(forest: &[Node]) -> Value {
    Value::Object(to_document(forest))
}

fn merge_node(target: &mut Map<String, Value>, node: &Node) {
    let value = if node.kind().is_nested() {
        let mut object = Map::new();
        for child in node.children() {
            merge_node(&mut object, child);
        }
        Value::Object(object)
    } else {
        Value::String(node.kind().as_label().to_string())
    };
    target.insert(node.name().to_string(), value);
}

/// Render the document as JSON. `Indent::Spaces(0)` gives compact output.
pub fn to_writer<W: Write>(writer: W, forest: &[Node], indent: Indent) -> Result<()> {
    write_json(writer, &to_document(forest), indent)
}

pub fn to_vec(forest: &[Node], indent: Indent) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_writer(&mut out, forest, indent)?;
    Ok(out)
}

pub fn to_string(forest: &[Node], indent: Indent) -> Result<String> {
    let bytes = to_vec(forest, indent)?;
    String::from_utf8(bytes).map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Render any serializable view (the document or a forest snapshot) as JSON.
pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    indent: Indent,
) -> Result<()> {
    let spaces = indent.get_spaces();
    if spaces == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; spaces];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

/// Plain-text outline, one field per line as `name: kind #key`, indented two
/// spaces per level. Children of fields that are no longer nested are hidden,
/// the same way the document hides them.
pub fn render_outline(forest: &[Node]) -> String {
    let mut writer = writer::OutlineWriter::new(OUTLINE_INDENT);
    for node in forest {
        writer.write_subtree(node, 0);
    }
    writer.finish()
}
