use crate::models::Attachment;

// -- Messages --

/// Typed form of a `POST /message` submission.
#[derive(Debug, Default)]
pub struct NewMessage {
    pub content: String,
    pub attachment: Option<Attachment>,
}
