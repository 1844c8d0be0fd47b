//! Line-respecting text chunking
//!
//! Splits text into size-bounded pieces for sequential provider requests.
//! Chunks never break inside a line; a single line longer than the budget is
//! emitted as its own oversized chunk rather than silently split. Size
//! accounting is character-count approximation, so callers keep the budget
//! conservatively below the provider's real limit.

use tracing::warn;

/// Chunks text into line-respecting pieces of at most `max_chunk_size` bytes
/// (except for single oversized lines).
#[derive(Debug, Clone, Copy)]
pub struct LineChunker {
    max_chunk_size: usize,
}

impl LineChunker {
    /// Create a chunker with the given character budget.
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Lazily chunk `text`. The returned iterator is finite and stateless
    /// between constructions; calling `chunk` again restarts from the top.
    ///
    /// Blank and whitespace-only lines are dropped, so concatenating the
    /// chunks recovers every non-blank line of the input exactly once, in
    /// order. Empty or whitespace-only input yields no chunks.
    pub fn chunk<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            lines: text.lines(),
            pending: None,
            max_chunk_size: self.max_chunk_size,
        }
    }

    /// Eagerly collect the chunks of `text`.
    pub fn chunk_to_vec(&self, text: &str) -> Vec<String> {
        self.chunk(text).collect()
    }
}

/// Iterator over the chunks of one input text.
pub struct Chunks<'a> {
    lines: std::str::Lines<'a>,
    pending: Option<&'a str>,
    max_chunk_size: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut buffer = String::new();

        loop {
            let line = match self.pending.take().or_else(|| self.lines.next()) {
                Some(line) => line,
                None => {
                    return if buffer.is_empty() { None } else { Some(buffer) };
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            if buffer.is_empty() {
                if line.len() > self.max_chunk_size {
                    // Never split inside a line; emit it alone, oversized.
                    warn!(
                        line_len = line.len(),
                        budget = self.max_chunk_size,
                        "line exceeds chunk budget, emitting oversized chunk"
                    );
                    return Some(line.to_string());
                }
                buffer.push_str(line);
            } else if buffer.len() + 1 + line.len() > self.max_chunk_size {
                self.pending = Some(line);
                return Some(buffer);
            } else {
                buffer.push('\n');
                buffer.push_str(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_one_chunk() {
        let chunker = LineChunker::new(1000);
        let chunks = chunker.chunk_to_vec("This is a small text that should not be chunked.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "This is a small text that should not be chunked.");
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = LineChunker::new(1000);
        assert!(chunker.chunk_to_vec("").is_empty());
        assert!(chunker.chunk_to_vec("  \n\n   \n").is_empty());
    }

    #[test]
    fn test_chunks_respect_budget() {
        let lines: Vec<String> = (0..100)
            .map(|i| format!("This is line {} with some content that pads it out a bit.", i))
            .collect();
        let text = lines.join("\n");

        let chunker = LineChunker::new(1000);
        let chunks = chunker.chunk_to_vec(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.len() <= 1000);
        }
    }

    #[test]
    fn test_concatenation_recovers_nonblank_lines_in_order() {
        let text = "first line\n\nsecond line\n   \nthird line";
        let chunker = LineChunker::new(15);
        let chunks = chunker.chunk_to_vec(text);

        let recovered: Vec<&str> = chunks.iter().flat_map(|c| c.lines()).collect();
        assert_eq!(recovered, vec!["first line", "second line", "third line"]);
    }

    #[test]
    fn test_oversized_line_emitted_alone() {
        let long_line = "a".repeat(50);
        let text = format!("short\n{}\nshort again", long_line);

        let chunker = LineChunker::new(20);
        let chunks = chunker.chunk_to_vec(&text);

        assert_eq!(chunks, vec!["short".to_string(), long_line, "short again".to_string()]);
        assert!(chunks[1].len() > 20);
    }

    #[test]
    fn test_iterator_is_restartable() {
        let chunker = LineChunker::new(10);
        let text = "one\ntwo\nthree";

        let first: Vec<String> = chunker.chunk(text).collect();
        let second: Vec<String> = chunker.chunk(text).collect();
        assert_eq!(first, second);
    }
}
