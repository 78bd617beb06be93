use thiserror::Error;

use crate::validation::{ALLOWED_EXTENSIONS, MAX_IMAGE_SIZE};

/// Everything a submission can trip over. None of these are fatal: each is
/// reported back to the user, who may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistError {
    #[error(
        "Unsupported file type {}. Allowed types: {}",
        describe_extension(.extension),
        ALLOWED_EXTENSIONS.join(", ")
    )]
    InvalidExtension { extension: String },

    #[error("Image is {size} bytes, over the {} MiB size limit", MAX_IMAGE_SIZE / (1024 * 1024))]
    FileTooLarge { size: u64 },

    #[error("Could not extract text from the image: {0}")]
    ExtractionFailed(String),

    #[error("Enter a question or upload an image containing text")]
    EmptyQuery,

    #[error("Knowledge base request failed: {0}")]
    ServiceCallFailed(String),
}

impl AssistError {
    pub fn code(&self) -> &'static str {
        match self {
            AssistError::InvalidExtension { .. } => "INVALID_EXTENSION",
            AssistError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AssistError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            AssistError::EmptyQuery => "EMPTY_QUERY",
            AssistError::ServiceCallFailed(_) => "SERVICE_CALL_FAILED",
        }
    }
}

fn describe_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        format!("'{}'", extension)
    }
}

pub type AssistResult<T> = std::result::Result<T, AssistError>;
