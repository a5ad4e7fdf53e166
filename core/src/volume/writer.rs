use super::artifact::VolumeArtifact;
use crate::error::{OctcatError, Result};
use log::info;
use nifti::writer::WriterOptions;
use nifti::NiftiHeader;
use std::io;
use std::path::Path;

/// NIfTI sform code for a transform aligned to another file's space
const NIFTI_XFORM_ALIGNED_ANAT: i16 = 2;

/// Writes assembled volumes as NIfTI-1 files
///
/// The file is written next to its destination under a temporary name and
/// renamed into place, so a failed write never leaves a partial volume.
#[derive(Debug, Clone)]
pub struct VolumeWriter {
    overwrite: bool,
}

impl Default for VolumeWriter {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

impl VolumeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: replace existing output files (default true)
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Builds the reference header carrying geometry and units
    pub fn header(artifact: &VolumeArtifact) -> NiftiHeader {
        let (width, depth, slice) = artifact.voxel_size();
        let affine = &artifact.affine;
        let row = |r: usize| -> [f32; 4] {
            [
                affine[r][0] as f32,
                affine[r][1] as f32,
                affine[r][2] as f32,
                affine[r][3] as f32,
            ]
        };

        let mut header = NiftiHeader::default();
        header.datatype = artifact.voxel_type.nifti_code();
        header.pixdim = [
            1.0,
            width as f32,
            depth as f32,
            slice as f32,
            1.0,
            1.0,
            1.0,
            1.0,
        ];
        header.xyzt_units = artifact.xyzt_units();
        header.qform_code = 0;
        header.sform_code = NIFTI_XFORM_ALIGNED_ANAT;
        header.srow_x = row(0);
        header.srow_y = row(1);
        header.srow_z = row(2);
        header
    }

    /// Writes an artifact to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the destination exists and overwriting is
    /// disabled, or if writing or renaming the file fails.
    pub fn write(&self, artifact: &VolumeArtifact, path: &Path) -> Result<()> {
        if !self.overwrite && path.exists() {
            return Err(OctcatError::IoError(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = tempfile::Builder::new()
            .prefix(".octcat-")
            .suffix(".nii")
            .tempfile_in(directory)?;

        let header = Self::header(artifact);
        WriterOptions::new(staging.path())
            .reference_header(&header)
            .write_nifti(&artifact.data)?;
        staging.persist(path)?;

        info!("Nifti image saved at {}", path.display());
        Ok(())
    }
}
