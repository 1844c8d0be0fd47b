//! Heuristic entity matching
//!
//! Decides whether a tracked entity string appears in a block of text,
//! tolerating spacing/punctuation variants and multi-word partial matches.
//! This is best-effort substring/token matching, not linguistic analysis;
//! no recall/precision guarantee is made.

/// Whether `entity` appears in `text`.
///
/// Four strategies are tried in fixed order; the first success wins, with no
/// partial-credit scoring:
///
/// 1. lower-cased, space-stripped substring match
/// 2. multi-token entities: every token found somewhere in the text,
///    order-independent
/// 3. substring match with spaces, hyphens, and periods stripped (catches
///    formatted numeric IDs like "06 05 41 01 46")
/// 4. long multi-word entities: at least two tokens longer than two
///    characters found (tolerates partial address matches)
pub fn matches(text: &str, entity: &str) -> bool {
    if entity.trim().is_empty() {
        return false;
    }

    // Strategy 1: direct substring match on space-stripped forms.
    let normalized_text = normalize_spaces(text);
    let normalized_entity = normalize_spaces(entity);
    if normalized_text.contains(&normalized_entity) {
        return true;
    }

    // Strategy 2: every token of a multi-token entity appears somewhere.
    let text_lower = text.to_lowercase();
    let tokens: Vec<String> = entity.split_whitespace().map(str::to_lowercase).collect();
    if tokens.len() > 1 && tokens.iter().all(|t| text_lower.contains(t)) {
        return true;
    }

    // Strategy 3: strip separators to catch formatted numeric IDs.
    if normalize_separators(text).contains(&normalize_separators(entity)) {
        return true;
    }

    // Strategy 4: partial match for longer entities such as addresses.
    if entity.len() > 5 && tokens.len() >= 2 {
        let found = tokens
            .iter()
            .filter(|t| t.chars().count() > 2 && text_lower.contains(t.as_str()))
            .count();
        if found >= 2 {
            return true;
        }
    }

    false
}

fn normalize_spaces(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

fn normalize_separators(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}
