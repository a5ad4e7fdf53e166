use super::artifact::{SpatialUnit, TemporalUnit, VolumeArtifact, VoxelType};
use crate::error::{OctcatError, Result};
use crate::types::{AcquisitionType, PropertySet};
use log::debug;
use ndarray::{Array3, Axis};

/// Builds a geometry-tagged volume from a raw B-scan byte stream
///
/// # Algorithm
///
/// 1. Derive the slice count from the buffer length and check it
/// 2. Reshape to the device's native (slice, depth, width) order
/// 3. Reorient to (width, depth, slice) with the depth axis flipped
/// 4. Attach a diagonal affine built from the voxel size
///
/// # Errors
///
/// Returns [`OctcatError::GeometryInconsistent`] if the buffer does not hold
/// a whole number of slices or the slice count disagrees with the recorded
/// frame count.
pub fn assemble(
    acquisition: AcquisitionType,
    raw: Vec<u8>,
    props: &PropertySet,
) -> Result<VolumeArtifact> {
    let num_slices = slice_count(raw.len(), props)?;
    let native = reshape_native(
        raw,
        num_slices,
        props.image_depth_pixels as usize,
        props.image_width_pixels as usize,
    )?;
    let data = reorient(native);
    debug!("{} volume assembled with shape {:?}", acquisition, data.dim());

    Ok(VolumeArtifact {
        acquisition,
        data,
        affine: diagonal_affine(props),
        voxel_type: VoxelType::U8,
        spatial_unit: SpatialUnit::Millimeter,
        temporal_unit: TemporalUnit::Second,
    })
}

/// Number of B-scans held in a buffer of `len` bytes
pub fn slice_count(len: usize, props: &PropertySet) -> Result<usize> {
    let per_slice = props.bytes_per_slice();
    if per_slice == 0 {
        return Err(OctcatError::GeometryInconsistent(format!(
            "image size {}x{} is empty",
            props.image_width_pixels, props.image_depth_pixels
        )));
    }
    if len % per_slice != 0 {
        return Err(OctcatError::GeometryInconsistent(format!(
            "{} bytes is not a whole number of {}-byte slices",
            len, per_slice
        )));
    }

    let num_slices = len / per_slice;
    if num_slices == 0 {
        return Err(OctcatError::GeometryInconsistent(
            "raw buffer holds no slices".to_string(),
        ));
    }
    if let Some(frames) = props.frame_count {
        if num_slices != frames as usize {
            return Err(OctcatError::GeometryInconsistent(format!(
                "raw buffer holds {} slices, metadata reports {} frames",
                num_slices, frames
            )));
        }
    }
    Ok(num_slices)
}

/// Reshapes the flat buffer into (slice, depth, width)
pub fn reshape_native(
    raw: Vec<u8>,
    num_slices: usize,
    depth: usize,
    width: usize,
) -> Result<Array3<u8>> {
    Ok(Array3::from_shape_vec((num_slices, depth, width), raw)?)
}

/// Reorders native (slice, depth, width) data into (width, depth, slice)
///
/// The device scans depth bottom-up, so the depth axis is flipped.
pub fn reorient(native: Array3<u8>) -> Array3<u8> {
    // (slice, depth, width) -> (depth, width, slice)
    let moved = native.permuted_axes([1, 2, 0]);
    // (depth, width, slice) -> (width, depth, slice)
    let transposed = moved.permuted_axes([1, 0, 2]);
    flip_depth(transposed)
}

/// Reverses the depth axis (axis 1) into a standard-layout array
pub fn flip_depth(mut volume: Array3<u8>) -> Array3<u8> {
    volume.invert_axis(Axis(1));
    volume.as_standard_layout().into_owned()
}

/// Voxel-to-world transform scaling by the voxel size
pub fn diagonal_affine(props: &PropertySet) -> [[f64; 4]; 4] {
    [
        [props.pixel_width_mm, 0.0, 0.0, 0.0],
        [0.0, props.pixel_depth_mm, 0.0, 0.0],
        [0.0, 0.0, props.slice_thickness_mm, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}
