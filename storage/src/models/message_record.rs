//! Message record model for persistence.
//!
//! One element of the `messages` array in the document file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    /// Body text; stored under the `message` key on disk.
    #[serde(rename = "message")]
    pub text: String,
    /// Keys other than `id` and `message`, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageRecord {
    /// Creates a new record with the given id and text. Uniqueness of `id` is not checked.
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            extra: Map::new(),
        }
    }
}
