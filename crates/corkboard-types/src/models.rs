use chrono::{DateTime, Utc};
use serde::Serialize;

/// A message as shown in the list view. Attachment bytes are never part of it.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSummary {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub file_name: Option<String>,
}

/// File name and bytes attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub data: Vec<u8>,
}
