use axum::extract::multipart::{Multipart, MultipartError};
use kb_assist::{Submission, UploadedImage};

pub const IMAGE_FIELD: &str = "image";
pub const QUERY_FIELD: &str = "query";

/// The form as posted: an optional image part and an optional text part.
#[derive(Debug, Default)]
pub struct QueryPayload {
    pub query: Option<String>,
    pub image: Option<UploadedImage>,
}

impl QueryPayload {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut payload = QueryPayload::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                IMAGE_FIELD => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    // Browsers send an empty, nameless part when no file was picked.
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    payload.image = Some(UploadedImage::new(filename, bytes.to_vec()));
                }
                QUERY_FIELD => {
                    payload.query = Some(field.text().await?);
                }
                other => {
                    log::debug!("Ignoring unexpected form field '{}'", other);
                }
            }
        }

        Ok(payload)
    }
}

impl From<QueryPayload> for Submission {
    fn from(payload: QueryPayload) -> Self {
        Submission {
            image: payload.image,
            user_query: payload.query,
        }
    }
}
