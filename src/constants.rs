/// Indentation added to a child's display margin relative to its parent.
pub const DEFAULT_INDENT_STEP: u32 = 30;

/// Spaces per level in the pretty-printed JSON document.
pub const DEFAULT_JSON_INDENT: usize = 2;

/// Spaces per depth level in the plain-text outline.
pub const OUTLINE_INDENT: usize = 2;

pub const KIND_LABELS: &[&str] = &["number", "string", "nested"];

#[inline]
pub fn is_kind_label(s: &str) -> bool {
    KIND_LABELS.contains(&s)
}
