use crate::error::{OctcatError, Result};
use crate::types::{
    parse_decimal, AcquisitionType, MetadataField, PixelSpacing, RecordProperties,
    EXPECTED_BIT_DEPTH, ISOTROPY_TOLERANCE_MM, MISSING_VALUE,
};
use log::debug;

use super::record::MetadataRecord;

/// Extracts slice and pixel geometry from one metadata record
///
/// # Algorithm
///
/// 1. Slice spacing: missing or unparseable → invalid, not positive → invalid
/// 2. Frame count: missing or unparseable → invalid; Macular Cube must
///    report exactly 128 frames
/// 3. Pixel spacing: missing or unparseable → invalid, either component
///    not positive → invalid
/// 4. Angiography only: pixel width and slice thickness must agree within
///    0.0005 mm
/// 5. Rows, columns and bits stored: any zero → invalid, bits stored other
///    than 8 → invalid
///
/// Missing or malformed optional fields never fail the call; they set
/// `valid = false` and leave [`MISSING_VALUE`] in place of the value.
///
/// # Errors
///
/// Returns [`OctcatError::RequiredFieldMissing`] if rows, columns or bits
/// stored are absent.
pub fn extract_properties<R: MetadataRecord + ?Sized>(
    record: &R,
    acquisition: AcquisitionType,
) -> Result<RecordProperties> {
    let mut valid = true;

    // 1. Slice thickness
    let slice_thickness_mm = recover(read_decimal(record, MetadataField::SliceSpacing), &mut valid);
    if slice_thickness_mm <= 0.0 {
        debug!("Slice spacing {} is not positive", slice_thickness_mm);
        valid = false;
    }

    // 2. Frame count
    let frame_count = recover(read_decimal(record, MetadataField::NumberOfFrames), &mut valid);
    if let Some(expected) = acquisition.expected_frame_count() {
        if frame_count != f64::from(expected) {
            debug!(
                "{} expects {} frames, record reports {}",
                acquisition, expected, frame_count
            );
            valid = false;
        }
    }

    // 3. Pixel spacing
    let spacing = match read_pixel_spacing(record) {
        Ok(spacing) => spacing,
        Err(e) => {
            debug!("{}", e);
            valid = false;
            PixelSpacing::new(MISSING_VALUE, MISSING_VALUE)
        }
    };
    if spacing.width <= 0.0 || spacing.depth <= 0.0 {
        debug!("Pixel spacing has a non-positive component: {}", spacing);
        valid = false;
    }

    // 4. Angiography voxels are isotropic across the scan
    if acquisition.is_angiography()
        && (spacing.width - slice_thickness_mm).abs() > ISOTROPY_TOLERANCE_MM
    {
        debug!(
            "Pixel width {} mm and slice thickness {} mm differ by more than {} mm",
            spacing.width, slice_thickness_mm, ISOTROPY_TOLERANCE_MM
        );
        valid = false;
    }

    // 5. Image size and bit depth
    let image_width_pixels = read_required(record, MetadataField::Rows)?;
    let image_depth_pixels = read_required(record, MetadataField::Columns)?;
    let bits_stored = read_required(record, MetadataField::BitsStored)?;
    let bit_depth = u16::try_from(bits_stored).unwrap_or(u16::MAX);

    if bit_depth != EXPECTED_BIT_DEPTH {
        debug!(
            "Expecting {} bit depth, found {}",
            EXPECTED_BIT_DEPTH, bits_stored
        );
        valid = false;
    }
    if image_width_pixels == 0 || image_depth_pixels == 0 || bit_depth == 0 {
        valid = false;
    }

    Ok(RecordProperties {
        valid,
        slice_thickness_mm,
        pixel_width_mm: spacing.width,
        pixel_depth_mm: spacing.depth,
        image_width_pixels,
        image_depth_pixels,
        bit_depth,
        frame_count,
    })
}

/// Reads a single decimal field through numeric cleanup
fn read_decimal<R: MetadataRecord + ?Sized>(record: &R, field: MetadataField) -> Result<f64> {
    let text = record
        .field_text(field)
        .ok_or(OctcatError::MetadataFieldMissing(field))?;
    parse_decimal(&text).ok_or(OctcatError::MetadataFieldMalformed { field, text })
}

/// Reads the two-component pixel spacing
fn read_pixel_spacing<R: MetadataRecord + ?Sized>(record: &R) -> Result<PixelSpacing> {
    let field = MetadataField::PixelSpacing;
    let text = record
        .field_text(field)
        .ok_or(OctcatError::MetadataFieldMissing(field))?;
    PixelSpacing::parse(&text).map_err(|_| OctcatError::MetadataFieldMalformed { field, text })
}

fn read_required<R: MetadataRecord + ?Sized>(record: &R, field: MetadataField) -> Result<u32> {
    record
        .field_u32(field)
        .ok_or(OctcatError::RequiredFieldMissing(field))
}

/// Turns a field-level failure into the sentinel value and clears `valid`
fn recover(value: Result<f64>, valid: &mut bool) -> f64 {
    match value {
        Ok(v) => v,
        Err(e) => {
            debug!("{}", e);
            *valid = false;
            MISSING_VALUE
        }
    }
}
