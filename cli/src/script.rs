//! Line-oriented command scripts.
//!
//! ```text
//! # comment
//! add <kind> <parent|-> [name...]
//! remove <key>
//! rename <key> [name...]
//! retype <key> <kind>
//! ```

use field_schema::{FieldKind, NodeKey, Request};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A parsed request and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub request: Request,
}

pub fn parse(input: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let request = parse_line(text).map_err(|message| ScriptError::new(line, message))?;
        steps.push(Step { line, request });
    }
    Ok(steps)
}

fn parse_line(text: &str) -> Result<Request, String> {
    let (command, rest) = split_word(text);
    match command {
        "add" => {
            let (kind, rest) = split_word(rest);
            let (parent, name) = split_word(rest);
            Ok(Request::Insert {
                kind: parse_kind(kind)?,
                parent: parse_parent(parent)?,
                name: name.trim_end().to_string(),
            })
        }
        "remove" => {
            let (key, rest) = split_word(rest);
            expect_end(rest)?;
            Ok(Request::Remove {
                key: parse_key(key)?,
            })
        }
        "rename" => {
            let (key, name) = split_word(rest);
            Ok(Request::EditName {
                key: parse_key(key)?,
                name: name.trim_end().to_string(),
            })
        }
        "retype" => {
            let (key, rest) = split_word(rest);
            let (kind, rest) = split_word(rest);
            expect_end(rest)?;
            Ok(Request::EditKind {
                key: parse_key(key)?,
                kind: parse_kind(kind)?,
            })
        }
        other => Err(format!("unknown command \"{other}\"")),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}

fn expect_end(rest: &str) -> Result<(), String> {
    if rest.trim().is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected trailing input \"{}\"", rest.trim()))
    }
}

fn parse_kind(raw: &str) -> Result<FieldKind, String> {
    FieldKind::from_label(raw).ok_or_else(|| {
        format!("invalid field kind \"{raw}\". Valid kinds are: number, string, nested")
    })
}

fn parse_parent(raw: &str) -> Result<Option<NodeKey>, String> {
    match raw {
        "-" => Ok(None),
        _ => parse_key(raw).map(Some),
    }
}

fn parse_key(raw: &str) -> Result<NodeKey, String> {
    if raw.is_empty() {
        return Err("missing field key".to_string());
    }
    raw.parse()
        .map_err(|_| format!("invalid field key \"{raw}\""))
}
