//! Column resolution for dispensing batches.
//!
//! Each batch snapshot names its columns differently. The resolver binds
//! the logical fields the pipeline needs to whatever headers a batch
//! actually carries, using the ordered alias lists of a [`SynonymTable`].
//!
//! [`SynonymTable`]: dispense_model::SynonymTable

mod error;
mod resolver;

pub use error::MappingError;
pub use resolver::{ColumnResolver, find_column};
