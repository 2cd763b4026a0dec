mod message_document;
mod message_record;

pub use message_document::MessageDocument;
pub use message_record::MessageRecord;
