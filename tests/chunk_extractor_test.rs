use std::path::Path;
use std::sync::Arc;

use akashic::application::ports::{PageReader, PageReaderError};
use akashic::application::services::ChunkExtractor;
use akashic::domain::{BoundingBox, PdfPage, WordBox};

const CHUNK_SIZE: usize = 1000;
const CHUNK_OVERLAP: usize = 200;

struct MockPageReader {
    pages: Vec<PdfPage>,
}

#[async_trait::async_trait]
impl PageReader for MockPageReader {
    async fn read_pages(&self, _path: &Path) -> Result<Vec<PdfPage>, PageReaderError> {
        Ok(self.pages.clone())
    }
}

fn word(text: &str, x1: f32, y1: f32, x2: f32, y2: f32) -> WordBox {
    WordBox {
        text: text.to_string(),
        bbox: BoundingBox::new(x1, y1, x2, y2).unwrap(),
    }
}

fn page(number: u32, text: &str, words: Vec<WordBox>) -> PdfPage {
    PdfPage {
        number,
        text: text.to_string(),
        words,
        width: 612.0,
        height: 792.0,
    }
}

#[tokio::test]
async fn given_two_pages_when_extracting_then_chunk_indices_restart_per_page() {
    let reader = Arc::new(MockPageReader {
        pages: vec![
            page(1, "Page one content.", vec![]),
            page(2, "Page two content.", vec![]),
        ],
    });
    let extractor = ChunkExtractor::new(reader, CHUNK_SIZE, CHUNK_OVERLAP);

    let chunks = extractor
        .extract(Path::new("books/sample.pdf"), "sample")
        .await
        .unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].page, 1);
    assert_eq!(chunks[0].chunk_index, 0);
    assert_eq!(chunks[1].page, 2);
    assert_eq!(chunks[1].chunk_index, 0);
    assert_eq!(chunks[0].book_name, "sample");
    assert_eq!(chunks[0].source, "books/sample.pdf");
}

#[tokio::test]
async fn given_matching_anchor_words_when_extracting_then_bbox_is_union_of_word_boxes() {
    let words = vec![
        word("Alpha", 10.0, 10.0, 30.0, 20.0),
        word("unrelated", 200.0, 200.0, 280.0, 210.0),
        word("gamma.", 40.0, 40.0, 60.0, 50.0),
    ];
    let reader = Arc::new(MockPageReader {
        pages: vec![page(1, "Alpha beta gamma.", words)],
    });
    let extractor = ChunkExtractor::new(reader, CHUNK_SIZE, CHUNK_OVERLAP);

    let chunks = extractor
        .extract(Path::new("books/sample.pdf"), "sample")
        .await
        .unwrap();

    // "unrelated" is not an anchor, but "Alpha" and "gamma." both are;
    // the chunk box spans them.
    let bbox = chunks[0].bbox.expect("anchors matched, bbox expected");
    assert_eq!(bbox.x1, 10.0);
    assert_eq!(bbox.y1, 10.0);
    assert_eq!(bbox.x2, 60.0);
    assert_eq!(bbox.y2, 50.0);
}

#[tokio::test]
async fn given_anchor_contained_in_longer_word_when_extracting_then_it_still_matches() {
    let words = vec![word("(gamma),", 15.0, 15.0, 55.0, 25.0)];
    let reader = Arc::new(MockPageReader {
        pages: vec![page(1, "alpha beta gamma", words)],
    });
    let extractor = ChunkExtractor::new(reader, CHUNK_SIZE, CHUNK_OVERLAP);

    let chunks = extractor
        .extract(Path::new("books/sample.pdf"), "sample")
        .await
        .unwrap();

    assert!(chunks[0].bbox.is_some());
}

#[tokio::test]
async fn given_no_matching_words_when_extracting_then_bbox_is_absent_not_an_error() {
    let words = vec![word("zzzz", 0.0, 0.0, 5.0, 5.0)];
    let reader = Arc::new(MockPageReader {
        pages: vec![page(1, "alpha beta gamma", words)],
    });
    let extractor = ChunkExtractor::new(reader, CHUNK_SIZE, CHUNK_OVERLAP);

    let chunks = extractor
        .extract(Path::new("books/sample.pdf"), "sample")
        .await
        .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].bbox, None);
    assert_eq!(chunks[0].page_width, 612.0);
    assert_eq!(chunks[0].page_height, 792.0);
}

#[tokio::test]
async fn given_long_page_when_extracting_then_chunks_respect_max_length_and_keep_content() {
    let text = "The opening sentence anchors the page. ".to_string()
        + &"Filler content keeps the splitter busy with many words. ".repeat(30)
        + "The closing sentence ends the page.";
    let reader = Arc::new(MockPageReader {
        pages: vec![page(1, &text, vec![])],
    });
    let extractor = ChunkExtractor::new(reader, 200, 40);

    let chunks = extractor
        .extract(Path::new("books/sample.pdf"), "sample")
        .await
        .unwrap();

    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 200);
    }

    let combined: String = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert!(combined.contains("The opening sentence"));
    assert!(combined.contains("The closing sentence ends the page."));

    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i as u32);
    }
}

#[tokio::test]
async fn given_document_with_no_pages_when_extracting_then_fails_with_no_text_found() {
    let reader = Arc::new(MockPageReader { pages: vec![] });
    let extractor = ChunkExtractor::new(reader, CHUNK_SIZE, CHUNK_OVERLAP);

    let result = extractor
        .extract(Path::new("books/empty.pdf"), "empty")
        .await;

    assert!(matches!(result, Err(PageReaderError::NoTextFound(_))));
}
