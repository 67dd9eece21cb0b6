use akashic::application::ports::SearchHit;
use akashic::application::services::assemble_references;
use akashic::domain::{
    Answer, AnswerMetadata, BoundingBox, Chunk, Confidence, NO_SIMILAR_DOCUMENT,
};

fn chunk_with_bbox() -> Chunk {
    Chunk::new(
        "Virtual memory gives each process its own address space.".to_string(),
        "CSAPP_2016".to_string(),
        "books/CSAPP_2016.pdf".to_string(),
        12,
        3,
        BoundingBox::new(72.0, 96.5, 540.0, 240.0),
        612.0,
        792.0,
    )
}

#[test]
fn given_reference_with_bbox_when_serializing_then_nested_and_flat_coordinates_are_present() {
    let references = assemble_references(&[SearchHit {
        chunk: chunk_with_bbox(),
        score: 0.31,
    }]);

    let json = serde_json::to_value(&references[0]).unwrap();

    assert_eq!(json["book_name"], "CSAPP_2016");
    assert_eq!(json["page"], 12);
    assert_eq!(json["chunk_index"], 3);
    assert_eq!(json["source"], "books/CSAPP_2016.pdf");
    assert_eq!(
        json["document"],
        "Virtual memory gives each process its own address space."
    );
    assert!(json["content_preview"]
        .as_str()
        .unwrap()
        .ends_with("..."));
    assert_eq!(json["page_width"], 612.0);
    assert_eq!(json["page_height"], 792.0);
    assert_eq!(json["bbox"]["x1"], 72.0);
    assert_eq!(json["bbox"]["y2"], 240.0);
    assert_eq!(json["x1"], 72.0);
    assert_eq!(json["y1"], 96.5);
    assert_eq!(json["x2"], 540.0);
    assert_eq!(json["y2"], 240.0);
    assert!(json["score"].as_f64().is_some());
}

#[test]
fn given_reference_without_bbox_when_serializing_then_coordinates_are_null_not_missing() {
    let mut chunk = chunk_with_bbox();
    chunk.bbox = None;

    let references = assemble_references(&[SearchHit { chunk, score: 0.4 }]);

    let json = serde_json::to_value(&references[0]).unwrap();

    assert!(json["bbox"].is_null());
    assert!(json["x1"].is_null());
    assert!(json["y2"].is_null());
    assert!(json.get("x1").is_some(), "null keys must still be present");
}

#[test]
fn given_no_match_answer_when_serializing_then_metadata_carries_reason_without_confidence() {
    let answer = Answer {
        question: "What is paging?".to_string(),
        answer: "No sufficiently similar textbook content was found.".to_string(),
        references: vec![],
        metadata: AnswerMetadata {
            confidence: None,
            threshold: Some(0.6),
            fallback_threshold: Some(0.65),
            reason: Some(NO_SIMILAR_DOCUMENT.to_string()),
            best_score: Some(0.72),
        },
    };

    let json = serde_json::to_value(&answer).unwrap();

    assert_eq!(json["metadata"]["reason"], "no_similar_document");
    assert!((json["metadata"]["threshold"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    assert!(json["metadata"].get("confidence").is_none());
    assert!((json["metadata"]["best_score"].as_f64().unwrap() - 0.72).abs() < 1e-6);
}

#[test]
fn given_answered_question_when_serializing_then_confidence_tier_is_lowercase() {
    let answer = Answer {
        question: "What is paging?".to_string(),
        answer: "Paging divides the address space into fixed-size pages.".to_string(),
        references: vec![],
        metadata: AnswerMetadata {
            confidence: Some(Confidence::Low),
            threshold: Some(0.6),
            fallback_threshold: Some(0.65),
            reason: None,
            best_score: None,
        },
    };

    let json = serde_json::to_value(&answer).unwrap();

    assert_eq!(json["metadata"]["confidence"], "low");
    assert!(json["metadata"].get("reason").is_none());
}
