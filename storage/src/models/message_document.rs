//! The persisted document: `{ "messages": [...] }`.
//!
//! Unknown top-level keys are kept in `extra` so a rewrite does not drop them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MessageRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDocument {
    pub messages: Vec<MessageRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageDocument {
    /// First record whose id equals `id`.
    pub fn find(&self, id: i64) -> Option<&MessageRecord> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Removes the first record whose id equals `id`. Later duplicates stay.
    pub fn remove_first(&mut self, id: i64) -> Option<MessageRecord> {
        let pos = self.messages.iter().position(|m| m.id == id)?;
        Some(self.messages.remove(pos))
    }

    /// Appends a record at the end of the sequence.
    pub fn push(&mut self, record: MessageRecord) {
        self.messages.push(record);
    }

    /// All records ordered by descending id. Equal ids keep document order.
    pub fn sorted_desc(self) -> Vec<MessageRecord> {
        let mut messages = self.messages;
        messages.sort_by(|a, b| b.id.cmp(&a.id));
        messages
    }
}
