use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Redirect},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use corkboard_db::models::{AttachmentRow, MessageRow};
use corkboard_types::models::{Attachment, MessageSummary};

use crate::AppState;
use crate::error::ApiError;
use crate::form::MessageForm;

/// GET /: every message, newest first, rendered as the board page.
pub async fn list_messages(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_messages())
        .await?
        .map_err(ApiError::Query)?;

    let messages: Vec<MessageSummary> = rows.into_iter().map(summary_from_row).collect();
    let page = state.pages.render_index(&messages)?;

    Ok(Html(page))
}

/// POST /message: optional `content` text field and optional `file` part.
/// Redirects back to the board.
pub async fn create_message(
    State(state): State<AppState>,
    MessageForm(form): MessageForm,
) -> Result<Redirect, ApiError> {
    let attached = form.attachment.as_ref().map(|a| a.data.len());

    let db = state.clone();
    let id = tokio::task::spawn_blocking(move || {
        let file = form
            .attachment
            .as_ref()
            .map(|a| (a.file_name.as_str(), a.data.as_slice()));
        db.db.insert_message(&form.content, file)
    })
    .await?
    .map_err(ApiError::Insert)?;

    match attached {
        Some(size) => info!("Message {} created with a {} byte attachment", id, size),
        None => info!("Message {} created", id),
    }

    Ok(Redirect::to("/"))
}

/// GET /download/{id}: the attachment bytes of one message.
pub async fn download_attachment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_attachment(id))
        .await?
        .map_err(ApiError::Query)?;

    let attachment = row.and_then(attachment_from_row).ok_or(ApiError::NotFound(id))?;
    let disposition = content_disposition(&attachment.file_name);

    debug!("Serving {} bytes of '{}' for message {}", attachment.data.len(), attachment.file_name, id);

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        attachment.data,
    ))
}

/// POST /delete/{id}: removes the message if it exists. Unknown ids are not an error.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    let db = state.clone();
    let removed = tokio::task::spawn_blocking(move || db.db.delete_message(id))
        .await?
        .map_err(ApiError::Delete)?;

    if removed > 0 {
        info!("Message {} deleted", id);
    } else {
        debug!("Delete of unknown message {} ignored", id);
    }

    Ok(Redirect::to("/"))
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn summary_from_row(row: MessageRow) -> MessageSummary {
    let timestamp = parse_timestamp(&row.timestamp).unwrap_or_else(|| {
        warn!("Corrupt timestamp '{}' on message {}", row.timestamp, row.id);
        DateTime::default()
    });

    MessageSummary {
        id: row.id,
        content: row.content,
        timestamp,
        // Older databases stored '' rather than NULL for "no file".
        file_name: row.file_name.filter(|name| !name.is_empty()),
    }
}

fn attachment_from_row(row: AttachmentRow) -> Option<Attachment> {
    match (row.file_name, row.file_data) {
        (Some(file_name), Some(data)) if !file_name.is_empty() => Some(Attachment { file_name, data }),
        _ => None,
    }
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS[.SSS]" in UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(|ndt| ndt.and_utc())
        .or_else(|_| raw.parse::<DateTime<Utc>>())
        .ok()
}

/// Quoted filename with `"`, `\` and control characters replaced, so the value
/// is always a legal header.
fn content_disposition(file_name: &str) -> HeaderValue {
    let safe: String = file_name
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    HeaderValue::from_bytes(format!("attachment; filename=\"{}\"", safe).as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
