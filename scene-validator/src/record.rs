//! The scene record under validation.

use serde::Serialize;
use serde_json::{Map, Value};

/// Fields every scene must carry.
pub const REQUIRED_FIELDS: &[&str] = &["id", "location", "time", "characters", "actions"];

/// Fields whose value must be a JSON array.
pub const LIST_FIELDS: &[&str] = &["characters", "actions"];

/// `scene_id` reported when the record has no `id`.
pub const UNKNOWN_SCENE_ID: &str = "unknown";

/// A narrative scene as a JSON object.
///
/// Only the presence and type of [`REQUIRED_FIELDS`] matter to validation;
/// any other keys are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SceneRecord(Map<String, Value>);

impl SceneRecord {
    /// Build a record from an arbitrary JSON value.
    ///
    /// A top-level value that is not an object has no fields at all, so every
    /// required field will be reported missing.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Whether the field is present, whatever its value.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The scene identifier, or `"unknown"` when the record has none.
    ///
    /// The JSON type of `id` is preserved.
    #[must_use]
    pub fn scene_id(&self) -> Value {
        self.0
            .get("id")
            .cloned()
            .unwrap_or_else(|| Value::String(UNKNOWN_SCENE_ID.to_owned()))
    }

    /// The underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
