pub mod composer;
pub mod error;
pub mod knowledge_base;
pub mod models;
pub mod ocr;
pub mod query_service;
pub mod validation;

pub use composer::compose_query;
pub use error::{AssistError, AssistResult};
pub use knowledge_base::{BedrockKnowledgeBase, KnowledgeBase};
pub use models::*;
pub use ocr::TextExtractor;
pub use query_service::QueryService;
pub use validation::{check_upload, validate_upload, UploadCheck};
