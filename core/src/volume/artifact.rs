use crate::types::AcquisitionType;
use ndarray::Array3;

/// Voxel data type of an assembled volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxelType {
    U8,
}

impl VoxelType {
    /// NIfTI-1 datatype code
    pub fn nifti_code(&self) -> i16 {
        match self {
            VoxelType::U8 => 2,
        }
    }
}

/// Unit of the spatial axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialUnit {
    Millimeter,
}

impl SpatialUnit {
    /// NIfTI-1 `xyzt_units` bits for this unit
    pub fn nifti_code(&self) -> u8 {
        match self {
            SpatialUnit::Millimeter => 2,
        }
    }
}

/// Unit of the temporal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalUnit {
    Second,
}

impl TemporalUnit {
    /// NIfTI-1 `xyzt_units` bits for this unit
    pub fn nifti_code(&self) -> u8 {
        match self {
            TemporalUnit::Second => 8,
        }
    }
}

/// Assembled, geometry-tagged volume
///
/// Axes are (width, depth, slice). The affine maps voxel indices to
/// millimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeArtifact {
    pub acquisition: AcquisitionType,
    pub data: Array3<u8>,
    /// Row-major 4x4 voxel-to-world transform
    pub affine: [[f64; 4]; 4],
    pub voxel_type: VoxelType,
    pub spatial_unit: SpatialUnit,
    pub temporal_unit: TemporalUnit,
}

impl VolumeArtifact {
    /// Dimensions as (width, depth, slices)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Diagonal of the affine
    pub fn affine_diagonal(&self) -> [f64; 4] {
        [
            self.affine[0][0],
            self.affine[1][1],
            self.affine[2][2],
            self.affine[3][3],
        ]
    }

    /// Voxel size in millimeters as (width, depth, slice)
    pub fn voxel_size(&self) -> (f64, f64, f64) {
        (self.affine[0][0], self.affine[1][1], self.affine[2][2])
    }

    /// Combined NIfTI `xyzt_units` field
    pub fn xyzt_units(&self) -> u8 {
        self.spatial_unit.nifti_code() | self.temporal_unit.nifti_code()
    }
}
