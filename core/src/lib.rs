pub mod cli;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod reconciliation;
pub mod selection;
pub mod types;
pub mod volume;

#[cfg(test)]
mod fixtures;

pub use cli::report::{PropertyReport, TextReport};
pub use discovery::{discover_data_directories, find_metadata_files, find_raw_volume};
pub use error::{OctcatError, Result};
pub use extraction::{extract_properties, MetadataRecord};
pub use pipeline::{BatchReport, Conversion, Pipeline, PipelineOptions, UnitFailure, UnitOutcome};
pub use reconciliation::{reconcile, reconcile_with_policy, RejectionPolicy};
pub use selection::{load_records, select_records, OctRecord};
pub use types::*;
pub use volume::{assemble, VolumeArtifact, VolumeWriter};
