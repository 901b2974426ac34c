//! Configuration options for a pipeline run.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::patterns::CriticalPatternTable;
use crate::reference::{ReferenceSource, default_reference_sources};
use crate::synonyms::SynonymTable;

/// Time bucket used for the series artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    /// One bucket per calendar day.
    #[default]
    #[serde(rename = "D")]
    Daily,
    /// One bucket per calendar month, keyed by its first day.
    #[serde(rename = "M")]
    Monthly,
}

impl Frequency {
    /// Maps a day to the first day of its bucket.
    pub fn bucket(self, day: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => day,
            Self::Monthly => day.with_day(1).unwrap_or(day),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Daily => "D",
            Self::Monthly => "M",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything that varies between runs of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub frequency: Frequency,
    pub synonyms: SynonymTable,
    pub patterns: CriticalPatternTable,
    pub references: Vec<ReferenceSource>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            frequency: Frequency::default(),
            synonyms: SynonymTable::default(),
            patterns: CriticalPatternTable::default(),
            references: default_reference_sources(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    #[must_use]
    pub fn with_patterns(mut self, patterns: CriticalPatternTable) -> Self {
        self.patterns = patterns;
        self
    }

    #[must_use]
    pub fn with_references(mut self, references: Vec<ReferenceSource>) -> Self {
        self.references = references;
        self
    }
}
