use crate::constants::{DEFAULT_INDENT_STEP, DEFAULT_JSON_INDENT};

/// Indentation used when rendering the document as JSON.
///
/// `Indent::Spaces(0)` renders compact single-line JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }

    pub fn get_spaces(self) -> usize {
        match self {
            Indent::Spaces(count) => count,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(DEFAULT_JSON_INDENT)
    }
}

/// Settings for one editing session.
///
/// # Examples
/// ```
/// use field_schema::{Indent, SessionOptions};
///
/// let opts = SessionOptions::new()
///     .with_indent_step(40)
///     .with_json_indent(Indent::Spaces(4));
/// assert_eq!(opts.indent_step, 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub indent_step: u32,
    pub json_indent: Indent,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_step(mut self, indent_step: u32) -> Self {
        self.indent_step = indent_step;
        self
    }

    pub fn with_json_indent(mut self, json_indent: Indent) -> Self {
        self.json_indent = json_indent;
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            indent_step: DEFAULT_INDENT_STEP,
            json_indent: Indent::default(),
        }
    }
}
