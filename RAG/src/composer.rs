use crate::error::{AssistError, AssistResult};
use crate::models::CombinedQuery;

pub const EXTRACTED_TEXT_LABEL: &str = "Text extracted from image:";

/// Merge the user's question with OCR output. At least one of them must carry
/// non-whitespace text, otherwise nothing is worth sending.
pub fn compose_query(user_query: Option<&str>, extracted_text: Option<&str>) -> AssistResult<CombinedQuery> {
    let user_query = user_query.map(str::trim).filter(|q| !q.is_empty());
    let extracted_text = extracted_text.map(str::trim).filter(|t| !t.is_empty());

    let combined = match (user_query, extracted_text) {
        (None, None) => return Err(AssistError::EmptyQuery),
        (Some(query), None) => query.to_string(),
        (None, Some(text)) => format!("{}\n{}", EXTRACTED_TEXT_LABEL, text),
        (Some(query), Some(text)) => format!("{}\n\n{}\n{}", query, EXTRACTED_TEXT_LABEL, text),
    };

    Ok(CombinedQuery(combined))
}
