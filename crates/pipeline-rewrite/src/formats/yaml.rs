//! YAML pipeline documents
//!
//! Parsing goes through serde_yaml. Output uses a small block emitter
//! instead of `serde_yaml::to_string`, which writes sequences flush with
//! their parent key; pipeline files indent them:
//!
//! ```yaml
//! processors:
//!   - set:
//!       field: test
//! ```
//!
//! Scalars are still rendered by serde_yaml so quoting follows its rules.

use crate::error::{ParseError, PipelineError, SerializeError};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

const DOCUMENT_START: &str = "---\n";
const INDENT: usize = 2;

pub(super) fn check_syntax(content: &str) -> Result<(), ParseError> {
    for doc in serde_yaml::Deserializer::from_str(content) {
        IgnoredAny::deserialize(doc).map_err(ParseError::Yaml)?;
    }
    Ok(())
}

pub(super) fn append_step<S: Serialize>(content: &str, step: &S) -> Result<String, PipelineError> {
    let mut root: Value = serde_yaml::from_str(content).map_err(ParseError::Yaml)?;
    let step = serde_yaml::to_value(step).map_err(SerializeError::Yaml)?;
    processors_mut(&mut root)?.push(step);

    let mut out = String::from(DOCUMENT_START);
    write_document(&root, &mut out)?;
    Ok(out)
}

fn processors_mut(root: &mut Value) -> Result<&mut Vec<Value>, ParseError> {
    let map = root.as_mapping_mut().ok_or(ParseError::NotAMapping)?;
    match map.get_mut("processors") {
        Some(Value::Sequence(processors)) => Ok(processors),
        Some(_) => Err(ParseError::ProcessorsNotSequence),
        None => Err(ParseError::MissingProcessors),
    }
}

/// Write `value` as a block-style document body
pub(super) fn write_document(value: &Value, out: &mut String) -> Result<(), SerializeError> {
    match value {
        Value::Mapping(map) if !map.is_empty() => write_mapping(map, 0, false, out),
        Value::Sequence(seq) if !seq.is_empty() => write_sequence(seq, 0, false, out),
        other => {
            out.push_str(&inline_value(other)?);
            out.push('\n');
            Ok(())
        }
    }
}

/// `inline` means the cursor already sits after a `- ` marker at `indent`.
fn write_mapping(map: &Mapping, indent: usize, inline: bool, out: &mut String) -> Result<(), SerializeError> {
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 || !inline {
            pad(indent, out);
        }
        out.push_str(&key_text(key)?);
        out.push(':');
        match block_child(value) {
            Some(Block::Mapping(child)) => {
                out.push('\n');
                write_mapping(child, indent + INDENT, false, out)?;
            }
            Some(Block::Sequence(child)) => {
                out.push('\n');
                write_sequence(child, indent + INDENT, false, out)?;
            }
            None => {
                out.push(' ');
                out.push_str(&inline_value(value)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn write_sequence(seq: &[Value], indent: usize, inline: bool, out: &mut String) -> Result<(), SerializeError> {
    for (i, item) in seq.iter().enumerate() {
        if i > 0 || !inline {
            pad(indent, out);
        }
        out.push_str("- ");
        match block_child(item) {
            Some(Block::Mapping(child)) => write_mapping(child, indent + INDENT, true, out)?,
            Some(Block::Sequence(child)) => write_sequence(child, indent + INDENT, true, out)?,
            None => {
                out.push_str(&inline_value(item)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

enum Block<'a> {
    Mapping(&'a Mapping),
    Sequence(&'a [Value]),
}

fn block_child(value: &Value) -> Option<Block<'_>> {
    match value {
        Value::Mapping(map) if !map.is_empty() => Some(Block::Mapping(map)),
        Value::Sequence(seq) if !seq.is_empty() => Some(Block::Sequence(seq)),
        _ => None,
    }
}

fn pad(indent: usize, out: &mut String) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn key_text(key: &Value) -> Result<String, SerializeError> {
    match key {
        Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => {
            Err(SerializeError::UnsupportedKey(format!("{key:?}")))
        }
        scalar => scalar_text(scalar),
    }
}

/// Text of a value that sits on the same line as its key or marker
fn inline_value(value: &Value) -> Result<String, SerializeError> {
    match value {
        Value::Mapping(map) if map.is_empty() => Ok("{}".to_string()),
        Value::Sequence(seq) if seq.is_empty() => Ok("[]".to_string()),
        // Block writers never hand a non-empty collection here; flow
        // JSON is valid YAML if one does arrive.
        Value::Mapping(_) | Value::Sequence(_) => serde_json::to_string(value).map_err(SerializeError::Json),
        Value::Tagged(tagged) => match &tagged.value {
            Value::Mapping(_) | Value::Sequence(_) => {
                Err(SerializeError::UnsupportedTag(tagged.tag.to_string()))
            }
            inner => Ok(format!("{} {}", tagged.tag, scalar_text(inner)?)),
        },
        scalar => scalar_text(scalar),
    }
}

/// Render a scalar with serde_yaml's quoting rules
///
/// Anything serde_yaml would spread over several lines (block literals,
/// folded long strings) is written as a double-quoted scalar instead, which
/// stays valid at any indentation.
fn scalar_text(value: &Value) -> Result<String, SerializeError> {
    let rendered = serde_yaml::to_string(value).map_err(SerializeError::Yaml)?;
    let rendered = rendered.strip_prefix("--- ").unwrap_or(&rendered);
    let rendered = rendered.trim_end_matches('\n');
    let rendered = rendered.strip_suffix("\n...").unwrap_or(rendered);

    if !rendered.contains('\n') {
        return Ok(rendered.to_string());
    }
    match value {
        Value::String(s) => serde_json::to_string(s).map_err(SerializeError::Json),
        _ => Ok(rendered.replace('\n', " ")),
    }
}
