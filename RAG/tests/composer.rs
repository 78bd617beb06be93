use kb_assist::composer::EXTRACTED_TEXT_LABEL;
use kb_assist::{compose_query, AssistError};
use pretty_assertions::assert_eq;

#[test]
fn rejects_when_nothing_to_ask() {
    assert_eq!(compose_query(Some(""), None).unwrap_err(), AssistError::EmptyQuery);
    assert_eq!(compose_query(None, None).unwrap_err(), AssistError::EmptyQuery);
    assert_eq!(
        compose_query(Some("   \n"), Some("\t")).unwrap_err(),
        AssistError::EmptyQuery
    );
}

#[test]
fn extracted_text_alone_is_enough() {
    let query = compose_query(Some(""), Some("Total: $42.00")).unwrap();
    assert!(query.as_str().contains("Total: $42.00"));
    assert_eq!(query.as_str(), format!("{}\nTotal: $42.00", EXTRACTED_TEXT_LABEL));
}

#[test]
fn user_text_alone_is_sent_as_is() {
    let query = compose_query(Some("  Why was I charged twice?  "), None).unwrap();
    assert_eq!(query.as_str(), "Why was I charged twice?");
}

#[test]
fn user_text_comes_first_then_labeled_block() {
    let query = compose_query(Some("Is this refundable?"), Some("Order #991\nTotal: $42.00")).unwrap();
    assert_eq!(
        query.as_str(),
        "Is this refundable?\n\nText extracted from image:\nOrder #991\nTotal: $42.00"
    );
}
