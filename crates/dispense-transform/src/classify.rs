//! Critical-item classification of normalized product text.

use dispense_model::CriticalPatternTable;
use regex::Regex;
use tracing::debug;

use crate::error::{ClassifierError, Result};

#[derive(Debug, Clone)]
struct CompiledRule {
    label: String,
    patterns: Vec<Regex>,
}

/// Assigns at most one critical-item label to a product.
///
/// Rules are tested in table order and the first label with any matching
/// pattern wins. Patterns are unanchored searches.
#[derive(Debug, Clone)]
pub struct ItemClassifier {
    rules: Vec<CompiledRule>,
}

impl ItemClassifier {
    /// Compiles every pattern of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidPattern`] for the first pattern
    /// that fails to compile.
    pub fn new(table: &CriticalPatternTable) -> Result<Self> {
        let mut rules = Vec::with_capacity(table.rules().len());
        for rule in table.rules() {
            let mut patterns = Vec::with_capacity(rule.patterns.len());
            for pattern in &rule.patterns {
                let regex = Regex::new(pattern).map_err(|source| ClassifierError::InvalidPattern {
                    label: rule.label.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
                patterns.push(regex);
            }
            rules.push(CompiledRule {
                label: rule.label.clone(),
                patterns,
            });
        }
        debug!(rules = rules.len(), "classifier compiled");
        Ok(Self { rules })
    }

    /// Label for already-normalized product text, if any.
    pub fn classify(&self, normalized: &str) -> Option<&str> {
        if normalized.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|re| re.is_match(normalized)))
            .map(|rule| rule.label.as_str())
    }
}
