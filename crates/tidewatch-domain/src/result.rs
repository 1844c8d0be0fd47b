//! Extraction result module - per-entity findings for one document

use serde::{Deserialize, Serialize};

/// Canonical value recorded for an entity that was not mentioned in a
/// document or in the model's answer.
pub const NO_INFORMATION: &str = "No information found.";

/// Information extracted for a single tracked entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFinding {
    /// The tracked term exactly as supplied in configuration
    pub entity: String,

    /// Free-text information extracted for the entity, or [`NO_INFORMATION`]
    pub info: String,
}

impl EntityFinding {
    /// Create a finding for an entity.
    pub fn new(entity: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            info: info.into(),
        }
    }

    /// Whether any information was extracted for this entity.
    pub fn has_information(&self) -> bool {
        self.info != NO_INFORMATION
    }
}

/// Ordered mapping of entity → extracted information for one document.
///
/// Entries are kept in the order the entities were supplied, so reports built
/// from a result are deterministic. A completed extraction contains exactly
/// one entry per requested entity.
///
/// # Examples
///
/// ```
/// use tidewatch_domain::{ExtractionResult, NO_INFORMATION};
///
/// let entities = vec!["Acme Corp".to_string(), "12345678".to_string()];
/// let result = ExtractionResult::no_information(&entities);
///
/// assert_eq!(result.len(), 2);
/// assert_eq!(result.get("Acme Corp"), Some(NO_INFORMATION));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    entries: Vec<EntityFinding>,
}

impl ExtractionResult {
    /// Create a result with every entity mapped to [`NO_INFORMATION`].
    pub fn no_information(entities: &[String]) -> Self {
        Self {
            entries: entities
                .iter()
                .map(|e| EntityFinding::new(e.clone(), NO_INFORMATION))
                .collect(),
        }
    }

    /// Create a result from pre-built findings, preserving their order.
    pub fn from_findings(entries: Vec<EntityFinding>) -> Self {
        Self { entries }
    }

    /// Look up the information recorded for an entity.
    pub fn get(&self, entity: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|f| f.entity == entity)
            .map(|f| f.info.as_str())
    }

    /// Record information for an entity, replacing any existing entry or
    /// appending a new one at the end.
    pub fn set(&mut self, entity: impl Into<String>, info: impl Into<String>) {
        let entity = entity.into();
        let info = info.into();
        match self.entries.iter_mut().find(|f| f.entity == entity) {
            Some(finding) => finding.info = info,
            None => self.entries.push(EntityFinding::new(entity, info)),
        }
    }

    /// Findings in supplied-entity order.
    pub fn findings(&self) -> &[EntityFinding] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the result holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entities with actual information.
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|f| f.has_information()).count()
    }

    /// Merge findings from a later chunk into this result.
    ///
    /// Information found in multiple chunks is preserved: when both this
    /// result and `other` carry information for the same entity, the pieces
    /// are joined with a blank line rather than overwritten. Entities only
    /// present in `other` are appended, so no entity is ever dropped.
    pub fn merge(&mut self, other: ExtractionResult) {
        for finding in other.entries {
            if !finding.has_information() {
                // Make sure the entity is at least present.
                if self.get(&finding.entity).is_none() {
                    self.entries.push(finding);
                }
                continue;
            }
            match self.entries.iter_mut().find(|f| f.entity == finding.entity) {
                Some(existing) if existing.has_information() => {
                    existing.info.push_str("\n\n");
                    existing.info.push_str(&finding.info);
                }
                Some(existing) => existing.info = finding.info,
                None => self.entries.push(finding),
            }
        }
    }
}

/// The full outcome of analyzing one document: per-entity findings plus the
/// raw model answer they were sliced from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Per-entity findings
    pub results: ExtractionResult,

    /// The model's raw answer text (empty when no network call was made)
    pub raw_answer: String,
}

impl DocumentAnalysis {
    /// Analysis recording that no entity was mentioned, without any model call.
    pub fn no_information(entities: &[String]) -> Self {
        Self {
            results: ExtractionResult::no_information(entities),
            raw_answer: String::new(),
        }
    }
}
