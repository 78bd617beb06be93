use serde::{Deserialize, Serialize};

use crate::error::AssistError;

pub const KNOWLEDGE_BASE_ID: &str = "QSDX9TVNUP";
pub const MODEL_ARN: &str =
    "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-5-sonnet-20240620-v1:0";

/// An image received with a submission. Lives only for the request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub image: Option<UploadedImage>,
    pub user_query: Option<String>,
}

/// User text plus any OCR output, ready to send. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedQuery(pub(crate) String);

impl CombinedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalRequest {
    pub query_text: String,
    pub knowledge_base_id: String,
    pub model_identifier: String,
}

impl RetrievalRequest {
    pub fn new(query: &CombinedQuery) -> Self {
        Self {
            query_text: query.as_str().to_string(),
            knowledge_base_id: KNOWLEDGE_BASE_ID.to_string(),
            model_identifier: MODEL_ARN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalResult {
    pub answer: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    /// The span of the answer this citation supports.
    pub generated_text: Option<String>,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    pub content: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurfacedError {
    pub code: String,
    pub message: String,
}

impl From<&AssistError> for SurfacedError {
    fn from(err: &AssistError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub request_id: String,
    pub extracted_text: Option<String>,
    pub result: Option<RetrievalResult>,
    pub errors: Vec<SurfacedError>,
    pub processing_time_ms: u128,
}

impl SubmissionOutcome {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            extracted_text: None,
            result: None,
            errors: Vec::new(),
            processing_time_ms: 0,
        }
    }

    pub fn surface(&mut self, err: &AssistError) {
        self.errors.push(SurfacedError::from(err));
    }

    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}
