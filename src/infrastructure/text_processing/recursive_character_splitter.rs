/// Separators tried in priority order; the empty string is the terminal
/// character-boundary fallback and always matches.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splits text recursively on paragraph breaks, then line breaks, then
/// spaces, then single characters, targeting `chunk_size` characters per
/// chunk with `chunk_overlap` characters carried over between consecutive
/// chunks. Lengths are counted in characters, not bytes.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, &SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let (index, separator) = separators
            .iter()
            .enumerate()
            .find(|(_, sep)| sep.is_empty() || text.contains(**sep))
            .map(|(i, sep)| (i, *sep))
            .unwrap_or((separators.len() - 1, ""));
        let remaining = &separators[index + 1..];

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(&piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge_pieces(std::mem::take(&mut pending)));
            }

            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_with(&piece, remaining));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge_pieces(pending));
        }

        chunks
    }

    /// Greedily packs small pieces into chunks of at most `chunk_size`
    /// characters, then rewinds the window to `chunk_overlap` characters
    /// so the tail of each chunk reappears at the head of the next.
    fn merge_pieces(&self, pieces: Vec<String>) -> Vec<String> {
        let mut merged = Vec::new();
        let mut window: Vec<String> = Vec::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(&piece);

            if total + len > self.chunk_size && !window.is_empty() {
                if let Some(chunk) = join_window(&window) {
                    merged.push(chunk);
                }
                while total > self.chunk_overlap
                    || (total + len > self.chunk_size && total > 0)
                {
                    total -= char_len(&window[0]);
                    window.remove(0);
                }
            }

            total += len;
            window.push(piece);
        }

        if let Some(chunk) = join_window(&window) {
            merged.push(chunk);
        }

        merged
    }
}

fn join_window(window: &[String]) -> Option<String> {
    let joined = window.concat();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits `text` so that each separator stays attached as a prefix of the
/// piece it introduces; concatenating the pieces reproduces the input.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut search_from = 0;

    while let Some(pos) = text[search_from..].find(separator) {
        let sep_at = search_from + pos;
        if sep_at > start {
            pieces.push(text[start..sep_at].to_string());
        }
        start = sep_at;
        search_from = sep_at + separator.len();
    }

    if start < text.len() {
        pieces.push(text[start..].to_string());
    }

    pieces
}
