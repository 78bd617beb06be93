use crate::composer::compose_query;
use crate::error::{AssistError, AssistResult};
use crate::knowledge_base::KnowledgeBase;
use crate::models::*;
use crate::ocr::{finish_extraction, TextExtractor};
use crate::validation::check_upload;
use std::sync::Arc;
use uuid::Uuid;

/// Runs one submission through validate -> extract -> compose -> dispatch.
///
/// Collaborators are injected. Leaving out the extractor turns OCR off: images
/// are still validated but contribute no text.
pub struct QueryService {
    knowledge_base: Arc<dyn KnowledgeBase>,
    extractor: Option<Arc<dyn TextExtractor>>,
}

impl QueryService {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>, extractor: Option<Arc<dyn TextExtractor>>) -> Self {
        Self {
            knowledge_base,
            extractor,
        }
    }

    pub fn ocr_enabled(&self) -> bool {
        self.extractor.is_some()
    }

    /// Never fails: every problem ends up in `SubmissionOutcome::errors`.
    pub async fn submit(&self, submission: Submission) -> SubmissionOutcome {
        let start_time = std::time::Instant::now();
        let mut outcome = SubmissionOutcome::new(Uuid::new_v4().to_string());

        self.run(submission, &mut outcome).await;

        outcome.processing_time_ms = start_time.elapsed().as_millis();
        log::info!(
            "[{}] submission finished in {} ms ({} error(s))",
            outcome.request_id,
            outcome.processing_time_ms,
            outcome.errors.len()
        );
        outcome
    }

    async fn run(&self, submission: Submission, outcome: &mut SubmissionOutcome) {
        let request_id = outcome.request_id.clone();
        let Submission { image, user_query } = submission;

        if let Some(image) = image {
            if let Err(e) = check_upload(&image.filename, image.size()) {
                log::warn!("[{}] rejected upload '{}': {}", request_id, image.filename, e);
                outcome.surface(&e);
                return;
            }

            if self.ocr_enabled() {
                match self.extract_text(image.bytes).await {
                    Ok(text) => {
                        log::info!("[{}] extracted {} characters from image", request_id, text.len());
                        outcome.extracted_text = Some(text);
                    }
                    Err(e) => {
                        log::warn!("[{}] {}", request_id, e);
                        outcome.surface(&e);
                    }
                }
            } else {
                log::info!("[{}] OCR disabled, image '{}' ignored", request_id, image.filename);
            }
        }

        let query = match compose_query(user_query.as_deref(), outcome.extracted_text.as_deref()) {
            Ok(query) => query,
            Err(e) => {
                log::warn!("[{}] {}", request_id, e);
                outcome.surface(&e);
                return;
            }
        };

        match self.dispatch(&query).await {
            Ok(result) => {
                log::info!("[{}] answer received with {} citation(s)", request_id, result.citations.len());
                outcome.result = Some(result);
            }
            Err(e) => {
                log::error!("[{}] {}", request_id, e);
                outcome.surface(&e);
            }
        }
    }

    /// OCR on the blocking pool. Empty output counts as a failure.
    pub async fn extract_text(&self, image: Vec<u8>) -> AssistResult<String> {
        let extractor = match &self.extractor {
            Some(extractor) => Arc::clone(extractor),
            None => return Err(AssistError::ExtractionFailed("OCR is not enabled".to_string())),
        };

        let raw = tokio::task::spawn_blocking(move || extractor.extract(&image))
            .await
            .unwrap_or_else(|e| Err(AssistError::ExtractionFailed(format!("OCR task failed: {}", e))))?;

        finish_extraction(&raw)
    }

    /// One call per invocation, nothing cached.
    pub async fn dispatch(&self, query: &CombinedQuery) -> AssistResult<RetrievalResult> {
        let request = RetrievalRequest::new(query);
        log::info!(
            "Querying knowledge base {} ({} characters)",
            request.knowledge_base_id,
            request.query_text.len()
        );

        self.knowledge_base
            .retrieve_and_generate(&request)
            .await
            .map_err(|e| AssistError::ServiceCallFailed(e.to_string()))
    }
}
