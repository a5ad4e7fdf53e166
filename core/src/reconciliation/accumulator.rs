use crate::error::{OctcatError, Result};
use crate::types::{AcquisitionType, PropertySet, RecordProperties};

/// Running aggregate over accepted records
///
/// Averaged fields keep a running sum; image size and frame count are
/// pinned by the first record pushed.
#[derive(Debug, Clone, Default)]
pub struct PropertyAccumulator {
    count: usize,
    slice_thickness_sum: f64,
    pixel_width_sum: f64,
    pixel_depth_sum: f64,
    bit_depth_sum: f64,
    first: Option<FirstSample>,
}

#[derive(Debug, Clone, Copy)]
struct FirstSample {
    image_width_pixels: u32,
    image_depth_pixels: u32,
    frame_count: Option<u32>,
}

impl PropertyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one accepted record into the aggregate
    pub fn push(&mut self, props: &RecordProperties) {
        self.count += 1;
        self.slice_thickness_sum += props.slice_thickness_mm;
        self.pixel_width_sum += props.pixel_width_mm;
        self.pixel_depth_sum += props.pixel_depth_mm;
        self.bit_depth_sum += f64::from(props.bit_depth);
        if self.first.is_none() {
            self.first = Some(FirstSample {
                image_width_pixels: props.image_width_pixels,
                image_depth_pixels: props.image_depth_pixels,
                frame_count: props.whole_frame_count(),
            });
        }
    }

    /// Number of records folded so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Reduces the aggregate to a property set
    ///
    /// # Errors
    ///
    /// Returns [`OctcatError::NoValidMetadata`] when nothing was pushed, and
    /// [`OctcatError::InvalidPropertySet`] when the means break an invariant.
    pub fn finish(self, acquisition: AcquisitionType) -> Result<PropertySet> {
        let first = match self.first {
            Some(first) if self.count > 0 => first,
            _ => return Err(OctcatError::NoValidMetadata(acquisition)),
        };
        let n = self.count as f64;

        let properties = PropertySet {
            slice_thickness_mm: self.slice_thickness_sum / n,
            pixel_width_mm: self.pixel_width_sum / n,
            pixel_depth_mm: self.pixel_depth_sum / n,
            image_width_pixels: first.image_width_pixels,
            image_depth_pixels: first.image_depth_pixels,
            bit_depth: (self.bit_depth_sum / n).round() as u16,
            frame_count: first.frame_count,
        };
        properties.validate(acquisition)?;
        Ok(properties)
    }
}
