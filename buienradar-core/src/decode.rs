//! Pure mapping from raw feed payloads to [`crate::model`] entities.
//!
//! JSON entities implement [`Decode`]; the key renaming for each entity shape
//! lives in the private `wire` module, the rain text format in [`rain`].

use serde_json::Value;

use crate::error::{Error, Result};

pub mod rain;
mod wire;

pub use rain::decode_rain_text;

/// An entity that can be decoded from one JSON object of the feed.
pub trait Decode: Sized {
    /// Name used in decode errors.
    const SHAPE: &'static str;

    fn from_json(value: &Value) -> Result<Self>;
}

/// Result of [`decode`]: a single entity for an object, all of them for an array.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// Decode an object into one entity or an array into entities in source order.
///
/// A single bad array element fails the whole batch.
pub fn decode<T: Decode>(value: &Value) -> Result<OneOrMany<T>> {
    match value {
        Value::Array(items) => decode_items(items).map(OneOrMany::Many),
        _ => T::from_json(value).map(OneOrMany::One),
    }
}

pub fn decode_one<T: Decode>(value: &Value) -> Result<T> {
    if let Value::Array(items) = value {
        return Err(Error::decode(
            T::SHAPE,
            format!("expected a single object, found an array of {}", items.len()),
        ));
    }
    T::from_json(value)
}

pub fn decode_many<T: Decode>(value: &Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => decode_items(items),
        other => Err(Error::decode(
            T::SHAPE,
            format!("expected an array, found {}", json_kind(other)),
        )),
    }
}

fn decode_items<T: Decode>(items: &[Value]) -> Result<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| T::from_json(item).map_err(|err| at_element(err, index)))
        .collect()
}

fn at_element(err: Error, index: usize) -> Error {
    match err {
        Error::DecodeFailed { shape, reason } => Error::DecodeFailed {
            shape,
            reason: format!("element {index}: {reason}"),
        },
        other => other,
    }
}

/// Walk a dotted path such as `forecast.shortterm` down from the feed root.
pub fn select<'a>(root: &'a Value, path: &str, shape: &'static str) -> Result<&'a Value> {
    path.split('.').try_fold(root, |node, key| {
        node.get(key)
            .ok_or_else(|| Error::decode(shape, format!("missing `{path}` in feed")))
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
