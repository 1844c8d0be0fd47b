//! Entity-aware relevance filtering
//!
//! Reduces a gazette document to the segments likely relevant to the tracked
//! entities, at escalating aggressiveness levels: paragraph-level, sentence-
//! level, and an "ultra" variant that keeps entity-matched sentences only.
//! Escalation only happens when the previous level's output is still too
//! large, so entity mentions are never truncated mid-sentence just to meet a
//! budget.

use crate::matcher;
use tracing::debug;

/// Gazette case-type vocabulary. Segments containing one of these are kept
/// even without a direct entity match, because they often carry the context
/// around a tracked entity (e.g. a "dødsbo" sentence explaining what happened
/// to a tracked person).
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "frivillig likvidation",
    "dødsbo",
    "konkurs",
    "tvangsauktion",
    "fusion",
    "skifteret",
    "sagsnummer",
    "cpr",
    "cvr",
    "adresse",
    "dødsdato",
];

/// Fallback prefix length when the sentence-level filter keeps nothing
pub const SENTENCE_FALLBACK_CHARS: usize = 1000;

/// Fallback prefix length when the ultra filter keeps nothing
pub const ULTRA_FALLBACK_CHARS: usize = 500;

const SENTENCE_SEPARATOR: &str = ". ";
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Paragraph-level filter: keeps paragraphs matching an entity or a domain
/// keyword. When nothing is kept, the document is returned unchanged.
pub fn filter_paragraphs(document: &str, entities: &[String]) -> String {
    let kept: Vec<&str> = document
        .split(PARAGRAPH_SEPARATOR)
        .filter(|p| is_relevant(p, entities))
        .collect();

    if kept.is_empty() {
        debug!("no relevant paragraphs, keeping document unchanged");
        return document.to_string();
    }

    debug!(kept = kept.len(), "paragraph filter");
    kept.join(PARAGRAPH_SEPARATOR)
}

/// Sentence-level filter: keeps sentences matching an entity or a domain
/// keyword. When nothing is kept, returns the first
/// [`SENTENCE_FALLBACK_CHARS`] characters so the worst-case payload stays
/// bounded.
pub fn filter_sentences(document: &str, entities: &[String]) -> String {
    filter_sentences_with_fallback(document, entities, SENTENCE_FALLBACK_CHARS)
}

/// [`filter_sentences`] with an explicit fallback prefix length.
pub fn filter_sentences_with_fallback(
    document: &str,
    entities: &[String],
    fallback_chars: usize,
) -> String {
    let kept: Vec<&str> = document
        .split(SENTENCE_SEPARATOR)
        .filter(|s| is_relevant(s, entities))
        .collect();

    if kept.is_empty() {
        debug!("no relevant sentences, falling back to document prefix");
        return char_prefix(document, fallback_chars).to_string();
    }

    debug!(kept = kept.len(), "sentence filter");
    kept.join(SENTENCE_SEPARATOR)
}

/// Maximal reduction: keeps only sentences with a direct entity match, no
/// domain-keyword rule. Applied when the sentence-level output still exceeds
/// the configured size threshold. Falls back to the first
/// [`ULTRA_FALLBACK_CHARS`] characters when nothing matches.
pub fn ultra_filter(text: &str, entities: &[String]) -> String {
    ultra_filter_with_fallback(text, entities, ULTRA_FALLBACK_CHARS)
}

/// [`ultra_filter`] with an explicit fallback prefix length.
pub fn ultra_filter_with_fallback(text: &str, entities: &[String], fallback_chars: usize) -> String {
    let kept: Vec<&str> = text
        .split(SENTENCE_SEPARATOR)
        .filter(|s| entities.iter().any(|e| matcher::matches(s, e)))
        .collect();

    if kept.is_empty() {
        debug!("ultra filter kept nothing, falling back to text prefix");
        return char_prefix(text, fallback_chars).to_string();
    }

    debug!(kept = kept.len(), "ultra filter");
    kept.join(SENTENCE_SEPARATOR)
}

fn is_relevant(segment: &str, entities: &[String]) -> bool {
    if entities.iter().any(|e| matcher::matches(segment, e)) {
        return true;
    }
    let lower = segment.to_lowercase();
    DOMAIN_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Char-boundary-safe prefix (gazette text is Danish; naive byte slicing
/// would split æ/ø/å).
fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> Vec<String> {
        vec!["Danske Bank".to_string(), "fintech".to_string()]
    }

    #[test]
    fn test_sentence_filter_keeps_entity_sentences() {
        let doc = "Danske Bank nævnes her. Helt irrelevant afsnit. Mere om fintech selskaber";
        let filtered = filter_sentences(doc, &entities());

        assert!(filtered.contains("Danske Bank"));
        assert!(filtered.contains("fintech"));
        assert!(!filtered.contains("irrelevant"));
    }

    #[test]
    fn test_sentence_filter_keeps_keyword_sentences() {
        let doc = "Selskabet er under konkurs. Ingenting her. Skifteretten i Aarhus behandler boet";
        let filtered = filter_sentences(doc, &["Some Company".to_string()]);

        assert!(filtered.contains("konkurs"));
        assert!(filtered.contains("Skifteretten"));
        assert!(!filtered.contains("Ingenting"));
    }

    #[test]
    fn test_sentence_filter_fallback_prefix() {
        let doc = "x".repeat(3000);
        let filtered = filter_sentences(&doc, &entities());
        assert_eq!(filtered.chars().count(), SENTENCE_FALLBACK_CHARS);
    }

    #[test]
    fn test_paragraph_filter_returns_document_when_nothing_matches() {
        let doc = "Helt almindelig tekst.\n\nUden relevante ord.";
        let filtered = filter_paragraphs(doc, &entities());
        assert_eq!(filtered, doc);
    }

    #[test]
    fn test_paragraph_filter_keeps_relevant_paragraphs() {
        let doc = "Afsnit om Danske Bank.\n\nHelt urelateret afsnit.\n\nAfsnit om tvangsauktion.";
        let filtered = filter_paragraphs(doc, &entities());

        assert!(filtered.contains("Danske Bank"));
        assert!(filtered.contains("tvangsauktion"));
        assert!(!filtered.contains("urelateret"));
    }

    #[test]
    fn test_ultra_filter_ignores_keywords() {
        let doc = "Selskabet er under konkurs. Danske Bank nævnes her";
        let filtered = ultra_filter(doc, &entities());

        assert!(filtered.contains("Danske Bank"));
        assert!(!filtered.contains("konkurs"));
    }

    #[test]
    fn test_ultra_filter_fallback_prefix() {
        let doc = "y".repeat(3000);
        let filtered = ultra_filter(&doc, &entities());
        assert_eq!(filtered.chars().count(), ULTRA_FALLBACK_CHARS);
    }

    #[test]
    fn test_ultra_at_least_as_aggressive_as_sentence_filter() {
        let doc = "Danske Bank nævnes her. Selskabet er under konkurs. Ren støj uden indhold";
        let sentence = filter_sentences(doc, &entities());
        let ultra = ultra_filter(doc, &entities());
        assert!(ultra.len() <= sentence.len());
    }

    #[test]
    fn test_never_empty_for_nonempty_input() {
        for doc in ["kort tekst uden noget", "Danske Bank. konkurs"] {
            assert!(!filter_sentences(doc, &entities()).is_empty());
            assert!(!filter_paragraphs(doc, &entities()).is_empty());
            assert!(!ultra_filter(doc, &entities()).is_empty());
        }
        assert!(filter_sentences("", &entities()).is_empty());
    }

    #[test]
    fn test_char_prefix_is_boundary_safe() {
        let doc = "døåæø".repeat(400);
        let prefix = char_prefix(&doc, 1000);
        assert_eq!(prefix.chars().count(), 1000);
    }
}
