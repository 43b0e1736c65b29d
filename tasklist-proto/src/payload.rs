//! Response-shape normalization.
//!
//! The service conventionally wraps payloads as `{ "data": ... }`, but bare
//! payloads are accepted too. [`Payload`] captures which of the two shapes
//! arrived, and the `into_*` methods turn either into the expected domain
//! value. Normalization never fails: an unrecognized shape yields an empty
//! sequence or an empty record.

use serde_json::Value;

use crate::task::Task;

/// Key under which the service envelopes its payload.
pub const ENVELOPE_KEY: &str = "data";

/// A decoded response body, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body was `{ "data": <value> }`; holds the inner value.
    Enveloped(Value),
    /// Body was the payload itself.
    Bare(Value),
}

impl Payload {
    /// Classifies a decoded JSON body.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key(ENVELOPE_KEY) => {
                Self::Enveloped(map.remove(ENVELOPE_KEY).unwrap_or(Value::Null))
            }
            other => Self::Bare(other),
        }
    }

    /// Parses raw body bytes. A body that is not JSON is treated as absent.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        serde_json::from_slice::<Value>(bytes).map_or(Self::Bare(Value::Null), Self::from_value)
    }

    /// Returns the inner value regardless of shape.
    #[must_use]
    pub fn into_inner(self) -> Value {
        match self {
            Self::Enveloped(value) | Self::Bare(value) => value,
        }
    }

    /// Normalizes to a sequence of tasks.
    ///
    /// Arrays decode element-wise, skipping elements that are not objects.
    /// Any other shape yields an empty sequence.
    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        match self.into_inner() {
            Value::Array(items) => items.into_iter().filter_map(decode_task).collect(),
            _ => Vec::new(),
        }
    }

    /// Normalizes to a single task.
    ///
    /// Objects decode directly and arrays contribute their first element.
    /// Anything else yields [`Task::default`].
    #[must_use]
    pub fn into_task(self) -> Task {
        match self.into_inner() {
            Value::Array(items) => items
                .into_iter()
                .next()
                .and_then(decode_task)
                .unwrap_or_default(),
            other => decode_task(other).unwrap_or_default(),
        }
    }
}

/// Decodes a single object into a task, or `None` for non-objects.
fn decode_task(value: Value) -> Option<Task> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}
