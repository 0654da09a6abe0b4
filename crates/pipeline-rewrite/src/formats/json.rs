//! JSON pipeline documents
//!
//! Uses serde_json with `preserve_order`, so existing keys keep their
//! position when the document is written back.

use crate::error::{ParseError, PipelineError, SerializeError};
use serde::de::IgnoredAny;
use serde::Serialize;
use serde_json::Value;

pub(super) fn check_syntax(content: &str) -> Result<(), ParseError> {
    serde_json::from_str::<IgnoredAny>(content)
        .map(|_| ())
        .map_err(ParseError::Json)
}

pub(super) fn append_step<S: Serialize>(content: &str, step: &S) -> Result<String, PipelineError> {
    let mut root: Value = serde_json::from_str(content).map_err(ParseError::Json)?;
    let step = serde_json::to_value(step).map_err(SerializeError::Json)?;
    processors_mut(&mut root)?.push(step);
    Ok(serde_json::to_string(&root).map_err(SerializeError::Json)?)
}

fn processors_mut(root: &mut Value) -> Result<&mut Vec<Value>, ParseError> {
    let map = root.as_object_mut().ok_or(ParseError::NotAMapping)?;
    match map.get_mut("processors") {
        Some(Value::Array(processors)) => Ok(processors),
        Some(_) => Err(ParseError::ProcessorsNotSequence),
        None => Err(ParseError::MissingProcessors),
    }
}
