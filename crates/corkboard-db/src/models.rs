//! Database row types: these map directly to SQLite rows.
//! Distinct from corkboard-types models to keep the DB layer independent.

/// Everything the list view needs; `file_data` is never selected.
pub struct MessageRow {
    pub id: i64,
    pub content: String,
    pub timestamp: String,
    pub file_name: Option<String>,
}

/// Attachment columns of a single message. Both are `None` when nothing was attached.
pub struct AttachmentRow {
    pub file_name: Option<String>,
    pub file_data: Option<Vec<u8>>,
}
