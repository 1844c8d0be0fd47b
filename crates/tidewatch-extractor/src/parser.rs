//! Provider answer parsing
//!
//! Turns the free-form answer text into one finding per tracked entity. The
//! answer format is requested as `<entity>: <info>` blocks separated by blank
//! lines, but the parser tolerates deviations: it locates the first
//! case-insensitive occurrence of each entity name and takes everything up to
//! the next blank line. An entity whose name never appears gets the
//! no-information sentinel.
//!
//! When one entity name is a substring of another's block, the first
//! occurrence wins. That ambiguity is accepted; entity names in practice are
//! company names and ID numbers that rarely collide.

use tidewatch_domain::{ExtractionResult, NO_INFORMATION};

/// Parse a provider answer into per-entity findings, in `entities` order.
pub fn parse_answer(answer: &str, entities: &[String]) -> ExtractionResult {
    let mut result = ExtractionResult::no_information(entities);

    for entity in entities {
        if let Some(idx) = find_ci(answer, entity) {
            let rest = &answer[idx..];
            let block = match rest.find("\n\n") {
                Some(end) => &rest[..end],
                None => rest,
            };
            let info = strip_entity_prefix(block.trim(), entity);
            if !info.is_empty() {
                result.set(entity, info);
            }
        }
    }

    result
}

/// Byte index of the first case-insensitive occurrence of `needle` in
/// `haystack`, or None. Comparison is per-char so the returned index is
/// always a char boundary of `haystack`, including for Danish letters whose
/// lowercase form differs in byte length from the original.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| starts_with_ci(&haystack[i..], needle))
}

fn starts_with_ci(text: &str, prefix: &str) -> bool {
    let mut text_chars = text.chars().flat_map(char::to_lowercase);
    let mut prefix_chars = prefix.chars().flat_map(char::to_lowercase);
    loop {
        match (prefix_chars.next(), text_chars.next()) {
            (None, _) => return true,
            (Some(_), None) => return false,
            (Some(p), Some(t)) if p != t => return false,
            _ => {}
        }
    }
}

/// Remove a leading entity-name echo (`Entity: info` or `Entity - info`)
/// from a block, leaving just the info text.
fn strip_entity_prefix(block: &str, entity: &str) -> String {
    if !starts_with_ci(block, entity) {
        return block.to_string();
    }

    // The matched prefix has the same char count as the entity; map that to
    // a byte offset in the block.
    let prefix_len: usize = block.chars().take(entity.chars().count()).map(char::len_utf8).sum();
    let mut rest = block[prefix_len..].trim_start();
    if let Some(stripped) = rest.strip_prefix(':').or_else(|| rest.strip_prefix('-')) {
        rest = stripped;
    }
    rest.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parses_well_formed_answer() {
        let answer = "Danske Bank: under konkursbehandling ved Sø- og Handelsretten\n\n\
                      Acme ApS: No information found.";
        let result = parse_answer(answer, &entities(&["Danske Bank", "Acme ApS"]));

        assert_eq!(
            result.get("Danske Bank"),
            Some("under konkursbehandling ved Sø- og Handelsretten")
        );
        assert_eq!(result.get("Acme ApS"), Some(NO_INFORMATION));
    }

    #[test]
    fn test_missing_entity_gets_sentinel() {
        let result = parse_answer("nothing relevant here", &entities(&["Danske Bank"]));
        assert_eq!(result.get("Danske Bank"), Some(NO_INFORMATION));
    }

    #[test]
    fn test_entity_match_is_case_insensitive() {
        let answer = "DANSKE BANK: tvangsauktion den 3. maj";
        let result = parse_answer(answer, &entities(&["Danske Bank"]));
        assert_eq!(result.get("Danske Bank"), Some("tvangsauktion den 3. maj"));
    }

    #[test]
    fn test_dash_separator_is_stripped() {
        let answer = "Danske Bank - dødsbo behandles ved Retten i Aarhus";
        let result = parse_answer(answer, &entities(&["Danske Bank"]));
        assert_eq!(
            result.get("Danske Bank"),
            Some("dødsbo behandles ved Retten i Aarhus")
        );
    }

    #[test]
    fn test_block_ends_at_blank_line() {
        let answer = "Danske Bank: første linje\nanden linje\n\nuvedkommende hale";
        let result = parse_answer(answer, &entities(&["Danske Bank"]));
        assert_eq!(result.get("Danske Bank"), Some("første linje\nanden linje"));
    }

    #[test]
    fn test_danish_letters_in_entity_names() {
        let answer = "Søren Ørsted: dødsdato 12. marts 2024, adresse Østergade 7";
        let result = parse_answer(answer, &entities(&["SØREN ØRSTED"]));
        assert_eq!(
            result.get("SØREN ØRSTED"),
            Some("dødsdato 12. marts 2024, adresse Østergade 7")
        );
    }

    #[test]
    fn test_results_preserve_entity_order() {
        let answer = "B: andet\n\nA: første";
        let result = parse_answer(answer, &entities(&["A", "B"]));
        let order: Vec<&str> = result.findings().iter().map(|f| f.entity.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn test_entity_echo_without_separator() {
        let answer = "Danske Bank under konkurs";
        let result = parse_answer(answer, &entities(&["Danske Bank"]));
        assert_eq!(result.get("Danske Bank"), Some("under konkurs"));
    }
}
