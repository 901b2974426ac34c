//! Critical-supply catalog and its matching rules.
//!
//! Patterns are regular expressions evaluated against normalized product
//! text (lowercase ASCII, single-spaced). Rule order is significant: the
//! first label with any matching pattern wins.

/// Human-readable catalog the pattern table was derived from.
pub const CRITICAL_ITEMS: [&str; 15] = [
    "Alcohol",
    "Guantes",
    "Solucion fisiologica",
    "IOP solucion",
    "IOP jabon",
    "Jeringas de 5ml",
    "jeringas de 10ml",
    "algodon",
    "macrogotero",
    "microgotero",
    "volutrol",
    "clorhexidina",
    "punzocath 20",
    "punzocath 22",
    "punzocath 18",
];

/// One label with its alternative patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalRule {
    pub label: String,
    pub patterns: Vec<String>,
}

impl CriticalRule {
    pub fn new<I, S>(label: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered rule list for the item classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPatternTable {
    rules: Vec<CriticalRule>,
}

impl CriticalPatternTable {
    pub fn new(rules: Vec<CriticalRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CriticalRule] {
        &self.rules
    }

    /// Labels sorted alphabetically.
    pub fn sorted_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.rules.iter().map(|rule| rule.label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

impl Default for CriticalPatternTable {
    fn default() -> Self {
        Self::new(vec![
            CriticalRule::new("ALCOHOL", [r"\balcohol\b"]),
            CriticalRule::new("GUANTES", [r"\bguante(s)?\b"]),
            CriticalRule::new(
                "SOLUCION FISIOLOGICA",
                [
                    r"\bsolucion\b.*\bfisiologic(a|o)\b",
                    r"\bfisiologic(a|o)\b",
                ],
            ),
            CriticalRule::new(
                "IOP SOLUCION",
                [r"\biop\b.*\bsolucion\b", r"\b(iop)\b.*\bsol\b"],
            ),
            CriticalRule::new("IOP JABON", [r"\biop\b.*\bjabon\b", r"\biop\b.*\bsoap\b"]),
            CriticalRule::new(
                "JERINGA 5ML",
                [
                    r"\bjeringa(s)?\b.*\b5\b\s*ml\b",
                    r"\b5\s*ml\b.*\bjeringa\b",
                ],
            ),
            CriticalRule::new(
                "JERINGA 10ML",
                [
                    r"\bjeringa(s)?\b.*\b10\b\s*ml\b",
                    r"\b10\s*ml\b.*\bjeringa\b",
                ],
            ),
            CriticalRule::new("ALGODON", [r"\balgodon\b"]),
            CriticalRule::new(
                "MACROGOTERO",
                [r"\bmacrogotero\b", r"\bmacro\b.*\bgote(ro)?\b"],
            ),
            CriticalRule::new(
                "MICROGOTERO",
                [r"\bmicrogotero\b", r"\bmicro\b.*\bgote(ro)?\b"],
            ),
            CriticalRule::new("VOLUTROL", [r"\bvolutrol\b"]),
            CriticalRule::new("CLORHEXIDINA", [r"\bclorhexidina\b", r"\bchlorhexidine\b"]),
            CriticalRule::new(
                "PUNZOCATH 18",
                [r"\bpunzocath\b.*\b18\b", r"\bpunzo\b.*\b18\b"],
            ),
            CriticalRule::new(
                "PUNZOCATH 20",
                [r"\bpunzocath\b.*\b20\b", r"\bpunzo\b.*\b20\b"],
            ),
            CriticalRule::new(
                "PUNZOCATH 22",
                [r"\bpunzocath\b.*\b22\b", r"\bpunzo\b.*\b22\b"],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_keeps_declaration_order() {
        let table = CriticalPatternTable::default();
        let labels: Vec<&str> = table.rules().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"ALCOHOL"));
        assert_eq!(labels.last(), Some(&"PUNZOCATH 22"));
        assert_eq!(labels.len(), CRITICAL_ITEMS.len());
    }

    #[test]
    fn sorted_labels_are_alphabetical() {
        let labels = CriticalPatternTable::default().sorted_labels();
        let mut expected = labels.clone();
        expected.sort();
        assert_eq!(labels, expected);
        assert_eq!(labels[0], "ALCOHOL");
        assert_eq!(labels[1], "ALGODON");
    }
}
