use super::AcquisitionType;
use crate::error::{OctcatError, Result};

/// Upper bound on a plausible slice thickness
pub const MAX_SLICE_THICKNESS_MM: f64 = 1.0;

/// Allowed difference between pixel width and slice thickness for angiography
pub const ISOTROPY_TOLERANCE_MM: f64 = 0.0005;

/// Only 8-bit grayscale exports are supported
pub const EXPECTED_BIT_DEPTH: u16 = 8;

/// Value recorded for a geometry field that is missing or unreadable
pub const MISSING_VALUE: f64 = -1.0;

/// Geometry read from a single metadata record
///
/// Values are returned even when `valid` is false so callers can report
/// what the record actually contained.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RecordProperties {
    /// Whether every sanity check passed
    pub valid: bool,
    pub slice_thickness_mm: f64,
    pub pixel_width_mm: f64,
    pub pixel_depth_mm: f64,
    pub image_width_pixels: u32,
    pub image_depth_pixels: u32,
    pub bit_depth: u16,
    /// Number of frames the record reports, or [`MISSING_VALUE`]
    pub frame_count: f64,
}

impl RecordProperties {
    /// Frame count as an integer, when the record carried a usable one
    pub fn whole_frame_count(&self) -> Option<u32> {
        if self.frame_count >= 1.0 && self.frame_count.fract() == 0.0 {
            Some(self.frame_count as u32)
        } else {
            None
        }
    }
}

/// Reconciled geometry for one acquisition
///
/// Built once by the reconciler and consumed by the volume assembler.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PropertySet {
    pub slice_thickness_mm: f64,
    pub pixel_width_mm: f64,
    pub pixel_depth_mm: f64,
    pub image_width_pixels: u32,
    pub image_depth_pixels: u32,
    pub bit_depth: u16,
    /// Frame count reported by the first accepted record
    pub frame_count: Option<u32>,
}

impl PropertySet {
    /// Voxel size as (width, depth, slice) in millimeters
    pub fn voxel_size(&self) -> (f64, f64, f64) {
        (
            self.pixel_width_mm,
            self.pixel_depth_mm,
            self.slice_thickness_mm,
        )
    }

    /// Number of bytes in one B-scan
    pub fn bytes_per_slice(&self) -> usize {
        self.image_width_pixels as usize * self.image_depth_pixels as usize
    }

    /// Checks the invariants every reconciled property set must hold
    ///
    /// # Errors
    ///
    /// Returns [`OctcatError::InvalidPropertySet`] naming the first violated
    /// invariant.
    pub fn validate(&self, acquisition: AcquisitionType) -> Result<()> {
        let fail = |msg: String| Err(OctcatError::InvalidPropertySet(msg));

        if !(self.slice_thickness_mm > 0.0 && self.slice_thickness_mm <= MAX_SLICE_THICKNESS_MM) {
            return fail(format!(
                "slice thickness {} mm outside (0, {}]",
                self.slice_thickness_mm, MAX_SLICE_THICKNESS_MM
            ));
        }
        if !(self.pixel_width_mm > 0.0) {
            return fail(format!("pixel width {} mm not positive", self.pixel_width_mm));
        }
        if !(self.pixel_depth_mm > 0.0) {
            return fail(format!("pixel depth {} mm not positive", self.pixel_depth_mm));
        }
        if self.image_width_pixels < 1 || self.image_depth_pixels < 1 {
            return fail(format!(
                "image size {}x{} pixels is empty",
                self.image_width_pixels, self.image_depth_pixels
            ));
        }
        if self.bit_depth != EXPECTED_BIT_DEPTH {
            return fail(format!(
                "bit depth {} (expected {})",
                self.bit_depth, EXPECTED_BIT_DEPTH
            ));
        }
        // Slack covers rounding in the averaged values
        if acquisition.is_angiography()
            && (self.pixel_width_mm - self.slice_thickness_mm).abs() > ISOTROPY_TOLERANCE_MM + 1e-9
        {
            return fail(format!(
                "pixel width {} mm and slice thickness {} mm are not isotropic",
                self.pixel_width_mm, self.slice_thickness_mm
            ));
        }
        Ok(())
    }
}
