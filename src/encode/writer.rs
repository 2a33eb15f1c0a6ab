use crate::tree::{FieldKind, Node, NodeKey};

/// Text buffer for the plain-text outline of a forest.
pub(crate) struct OutlineWriter {
    buffer: String,
    indent_unit: String,
    indent_cache: Vec<String>,
}

impl OutlineWriter {
    pub fn new(indent_spaces: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_unit: " ".repeat(indent_spaces),
            indent_cache: vec![String::new()],
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    pub fn write_indent(&mut self, depth: usize) {
        if depth == 0 || self.indent_unit.is_empty() {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer.push_str(&self.indent_cache[depth]);
    }

    pub fn write_name(&mut self, name: &str) {
        if name.is_empty() {
            self.write_str("(unnamed)");
        } else {
            self.write_str(name);
        }
    }

    pub fn write_key(&mut self, key: NodeKey) {
        let mut buf = itoa::Buffer::new();
        self.buffer.push('#');
        self.buffer.push_str(buf.format(key.get()));
    }

    /// `name: kind #key` at the given depth.
    pub fn write_field(&mut self, node: &Node, depth: usize) {
        if !self.buffer.is_empty() {
            self.write_newline();
        }
        self.write_indent(depth);
        self.write_name(node.name());
        self.write_str(": ");
        self.write_str(node.kind().as_label());
        self.buffer.push(' ');
        self.write_key(node.key());
    }

    /// Writes `node` and, if it is nested, its children below it.
    pub fn write_subtree(&mut self, node: &Node, depth: usize) {
        self.write_field(node, depth);
        if node.kind() == FieldKind::Nested {
            for child in node.children() {
                self.write_subtree(child, depth + 1);
            }
        }
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => {
                    let mut s = String::with_capacity(prev.len() + self.indent_unit.len());
                    s.push_str(prev);
                    s.push_str(&self.indent_unit);
                    s
                }
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}
