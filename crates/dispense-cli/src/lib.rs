//! CLI library components for the dispensing ETL.

pub mod logging;
pub mod pipeline;
pub mod types;
