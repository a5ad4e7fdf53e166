use crate::types::{AcquisitionType, MetadataField};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for octcat operations
pub type Result<T> = std::result::Result<T, OctcatError>;

/// Error types for octcat operations
#[derive(Error, Debug)]
pub enum OctcatError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Optional geometry field absent from a record
    #[error("Metadata field missing: {0}")]
    MetadataFieldMissing(MetadataField),

    /// Geometry field present but not parseable after numeric cleanup
    #[error("Metadata field malformed: {field} = {text:?}")]
    MetadataFieldMalformed { field: MetadataField, text: String },

    /// Field every record is expected to carry (rows, columns, bits stored)
    #[error("Required field missing: {0}")]
    RequiredFieldMissing(MetadataField),

    /// No record survived reconciliation
    #[error("No valid metadata records for {0}")]
    NoValidMetadata(AcquisitionType),

    /// More than one raw file matches an acquisition type
    #[error("Ambiguous source file for {acquisition}: {} candidates", .candidates.len())]
    AmbiguousSourceFile {
        acquisition: AcquisitionType,
        candidates: Vec<PathBuf>,
    },

    /// No raw file matches an acquisition type
    #[error("No raw data file for {acquisition} in {}", .directory.display())]
    NoMatchFound {
        acquisition: AcquisitionType,
        directory: PathBuf,
    },

    /// Raw byte count disagrees with the reconciled geometry
    #[error("Geometry inconsistent: {0}")]
    GeometryInconsistent(String),

    /// Reconciled values violate a property set invariant
    #[error("Invalid property set: {0}")]
    InvalidPropertySet(String),

    /// Unrecognised acquisition type label
    #[error("Unknown acquisition type: {0}")]
    UnknownAcquisitionType(String),

    /// NIfTI writing error
    #[error("NIfTI error: {0}")]
    NiftiError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OctcatError {
    /// Short, stable name of the error kind for reports
    pub fn kind(&self) -> &'static str {
        match self {
            OctcatError::DicomError(_) => "DicomError",
            OctcatError::MetadataFieldMissing(_) => "MetadataFieldMissing",
            OctcatError::MetadataFieldMalformed { .. } => "MetadataFieldMalformed",
            OctcatError::RequiredFieldMissing(_) => "RequiredFieldMissing",
            OctcatError::NoValidMetadata(_) => "NoValidMetadata",
            OctcatError::AmbiguousSourceFile { .. } => "AmbiguousSourceFile",
            OctcatError::NoMatchFound { .. } => "NoMatchFound",
            OctcatError::GeometryInconsistent(_) => "GeometryInconsistent",
            OctcatError::InvalidPropertySet(_) => "InvalidPropertySet",
            OctcatError::UnknownAcquisitionType(_) => "UnknownAcquisitionType",
            OctcatError::NiftiError(_) => "NiftiError",
            OctcatError::IoError(_) => "IoError",
        }
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for OctcatError {
    fn from(e: dicom_object::ReadError) -> Self {
        OctcatError::DicomError(format!("{}", e))
    }
}

impl From<walkdir::Error> for OctcatError {
    fn from(e: walkdir::Error) -> Self {
        OctcatError::IoError(e.into())
    }
}

impl From<ndarray::ShapeError> for OctcatError {
    fn from(e: ndarray::ShapeError) -> Self {
        OctcatError::GeometryInconsistent(format!("{}", e))
    }
}

impl From<nifti::error::NiftiError> for OctcatError {
    fn from(e: nifti::error::NiftiError) -> Self {
        OctcatError::NiftiError(format!("{}", e))
    }
}

impl From<tempfile::PersistError> for OctcatError {
    fn from(e: tempfile::PersistError) -> Self {
        OctcatError::IoError(e.error)
    }
}
