use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use serde::Deserialize;

use corkboard_types::api::NewMessage;
use corkboard_types::models::Attachment;

use crate::error::ApiError;

/// `POST /message` body, typed at the boundary.
///
/// Accepts `multipart/form-data` (text plus optional file) and
/// `application/x-www-form-urlencoded` (text only). Any other body, including
/// none at all, is a message with empty content and no attachment.
pub struct MessageForm(pub NewMessage);

#[derive(Debug, Deserialize)]
struct ContentOnly {
    #[serde(default)]
    content: String,
}

impl<S> FromRequest<S> for MessageForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::FormRead(e.body_text()))?;
            return parse_multipart(multipart).await.map(MessageForm);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<ContentOnly>::from_request(req, state)
                .await
                .map_err(|e| ApiError::FormRead(e.body_text()))?;
            return Ok(MessageForm(NewMessage {
                content: form.content,
                attachment: None,
            }));
        }

        Ok(MessageForm(NewMessage::default()))
    }
}

async fn parse_multipart(mut multipart: Multipart) -> Result<NewMessage, ApiError> {
    let mut form = NewMessage::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("content") => form.content = field.text().await?,
            Some("file") => {
                // Browsers send an unnamed, empty part when no file was picked.
                let file_name = field.file_name().map(str::to_owned).unwrap_or_default();
                if file_name.is_empty() {
                    continue;
                }
                let data = field.bytes().await?;
                form.attachment = Some(Attachment {
                    file_name,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}
