use crate::error::Result;
use crate::extraction::MetadataRecord;
use crate::types::MetadataField;
use dicom_object::{open_file, InMemDicomObject};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Metadata record combining file path and decoded data set
#[derive(Debug, Clone)]
pub struct OctRecord {
    /// Path to the DICOM file
    pub file_path: PathBuf,

    /// Decoded data set
    pub dataset: InMemDicomObject,
}

impl OctRecord {
    /// Creates a record from a DICOM file path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to DICOM file
    ///
    /// # Returns
    ///
    /// Result containing the OctRecord or an error
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let dcm = open_file(&path)?;
        Ok(Self::from_dicom(path, dcm.into_inner()))
    }

    /// Creates a record from an already-decoded data set
    pub fn from_dicom(path: PathBuf, dataset: InMemDicomObject) -> Self {
        Self {
            file_path: path,
            dataset,
        }
    }
}

impl MetadataRecord for OctRecord {
    fn field_text(&self, field: MetadataField) -> Option<String> {
        self.dataset.field_text(field)
    }

    fn field_u32(&self, field: MetadataField) -> Option<u32> {
        self.dataset.field_u32(field)
    }
}

/// Opens every path as a metadata record
///
/// Files that fail to decode are logged and left out; an unreadable record
/// never aborts the directory.
pub fn load_records<P: AsRef<Path>>(paths: &[P]) -> Vec<OctRecord> {
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        match OctRecord::from_file(path.to_path_buf()) {
            Ok(record) => {
                debug!("Loaded record: {}", path.display());
                records.push(record);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }
    records
}
