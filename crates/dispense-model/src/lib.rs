//! Shared data model for the critical-supply dispensing pipeline.

pub mod fields;
pub mod lookup;
pub mod options;
pub mod patterns;
pub mod record;
pub mod reference;
pub mod synonyms;

pub use fields::{ColumnMap, LogicalField};
pub use lookup::CaseInsensitiveSet;
pub use options::{Frequency, PipelineOptions};
pub use patterns::{CRITICAL_ITEMS, CriticalPatternTable, CriticalRule};
pub use record::EnrichedRecord;
pub use reference::{
    CodeCleaning, ReferenceDomain, ReferenceLayout, ReferenceSource, SourceRole,
    default_reference_sources,
};
pub use synonyms::SynonymTable;
