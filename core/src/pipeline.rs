//! Driver tying selection, reconciliation, assembly and persistence together
//!
//! A unit of work is one (data directory, acquisition type) pair. A unit
//! that fails is recorded in the [`BatchReport`] and the batch moves on to
//! the next one.

use crate::discovery::{find_metadata_files, find_raw_volume};
use crate::error::{OctcatError, Result};
use crate::extraction::MetadataRecord;
use crate::reconciliation::{reconcile_with_policy, RejectionPolicy};
use crate::selection::{load_records, select_records, OctRecord};
use crate::types::{AcquisitionType, PropertySet};
use crate::volume::{assemble, VolumeWriter};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// How reconciliation treats rejected records
    pub rejection_policy: RejectionPolicy,

    /// Replace existing output volumes
    pub overwrite: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            rejection_policy: RejectionPolicy::SkipRecord,
            overwrite: true,
        }
    }
}

impl PipelineOptions {
    /// Creates options with skip-and-continue reconciliation and overwriting
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the rejection policy
    pub fn with_rejection_policy(mut self, policy: RejectionPolicy) -> Self {
        self.rejection_policy = policy;
        self
    }

    /// Builder: set whether existing outputs are replaced
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Result of one successful conversion
#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Conversion {
    pub acquisition: AcquisitionType,

    /// Raw file the voxels were read from
    pub source_path: PathBuf,

    /// Written NIfTI volume
    pub output_path: PathBuf,

    /// Reconciled geometry
    pub properties: PropertySet,

    /// Volume shape as (width, depth, slices)
    pub dim: (usize, usize, usize),
}

/// Reported cause of a failed unit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct UnitFailure {
    /// Short error kind, see [`OctcatError::kind`]
    pub kind: &'static str,
    pub message: String,
}

impl From<&OctcatError> for UnitFailure {
    fn from(e: &OctcatError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Outcome of one (directory, acquisition type) unit
#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct UnitOutcome {
    pub directory: PathBuf,
    pub acquisition: AcquisitionType,
    pub result: std::result::Result<Conversion, UnitFailure>,
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in processing order
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BatchReport {
    pub outcomes: Vec<UnitOutcome>,
}

impl BatchReport {
    /// Number of units that produced a volume
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of units that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when there was work to do and none of it succeeded
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.succeeded() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Converts exported OCT scans into NIfTI volumes
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Converts one acquisition type found in a data directory
    ///
    /// Metadata records are loaded from every `.dcm` file below the directory.
    pub fn convert(&self, directory: &Path, acquisition: AcquisitionType) -> Result<Conversion> {
        let records = load_directory_records(directory)?;
        self.convert_records(directory, &records, acquisition)
    }

    /// Converts one acquisition type using already-loaded records
    ///
    /// # Algorithm
    ///
    /// 1. Select the records whose protocol names the acquisition type
    /// 2. Reconcile their geometry into one property set
    /// 3. Locate exactly one raw file and read it
    /// 4. Assemble the volume and write it to `<directory>/<stem>.nii`
    ///
    /// # Errors
    ///
    /// Any failure aborts this conversion only. Nothing is written unless
    /// every step before the write succeeded.
    pub fn convert_records<R: MetadataRecord>(
        &self,
        directory: &Path,
        records: &[R],
        acquisition: AcquisitionType,
    ) -> Result<Conversion> {
        let selected = select_records(records, acquisition);
        let properties =
            reconcile_with_policy(acquisition, selected, self.options.rejection_policy)?;

        let source_path = find_raw_volume(directory, acquisition)?;
        let raw = fs::read(&source_path)?;
        let artifact = assemble(acquisition, raw, &properties)?;

        let output_path = directory.join(acquisition.output_file_name());
        VolumeWriter::new()
            .overwrite(self.options.overwrite)
            .write(&artifact, &output_path)?;

        Ok(Conversion {
            acquisition,
            source_path,
            output_path,
            properties,
            dim: artifact.dim(),
        })
    }

    /// Runs every acquisition type over every directory
    ///
    /// Records are loaded once per directory. A directory whose records
    /// cannot be listed fails all of its units.
    pub fn run_batch(
        &self,
        directories: &[PathBuf],
        acquisitions: &[AcquisitionType],
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for directory in directories {
            info!("Parsing {}", directory.display());
            let records = match load_directory_records(directory) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Omitting {}: {}", directory.display(), e);
                    for &acquisition in acquisitions {
                        report.outcomes.push(UnitOutcome {
                            directory: directory.clone(),
                            acquisition,
                            result: Err(UnitFailure::from(&e)),
                        });
                    }
                    continue;
                }
            };

            for &acquisition in acquisitions {
                let result = self
                    .convert_records(directory, &records, acquisition)
                    .map_err(|e| {
                        warn!(
                            "{} in {} failed ({}): {}",
                            acquisition,
                            directory.display(),
                            e.kind(),
                            e
                        );
                        UnitFailure::from(&e)
                    });
                report.outcomes.push(UnitOutcome {
                    directory: directory.clone(),
                    acquisition,
                    result,
                });
            }
        }

        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }
}

fn load_directory_records(directory: &Path) -> Result<Vec<OctRecord>> {
    let files = find_metadata_files(directory)?;
    let records = load_records(&files);
    info!(
        "Loaded {} of {} metadata records from {}",
        records.len(),
        files.len(),
        directory.display()
    );
    Ok(records)
}
