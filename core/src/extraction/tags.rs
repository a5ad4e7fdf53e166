use crate::types::MetadataField;
use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Geometry Tags
pub use dicom_dictionary_std::tags::{
    BITS_STORED, COLUMNS, NUMBER_OF_FRAMES, PIXEL_SPACING, ROWS, SPACING_BETWEEN_SLICES,
};

// Protocol Description Tags
pub use dicom_dictionary_std::tags::{CODE_MEANING, PERFORMED_PROTOCOL_CODE_SEQUENCE};

/// Tag holding a top-level metadata field
///
/// Returns `None` for [`MetadataField::CodeMeaning`], which lives inside a
/// sequence item rather than at the top level.
pub fn tag_for(field: MetadataField) -> Option<Tag> {
    match field {
        MetadataField::SliceSpacing => Some(SPACING_BETWEEN_SLICES),
        MetadataField::NumberOfFrames => Some(NUMBER_OF_FRAMES),
        MetadataField::PixelSpacing => Some(PIXEL_SPACING),
        MetadataField::Rows => Some(ROWS),
        MetadataField::Columns => Some(COLUMNS),
        MetadataField::BitsStored => Some(BITS_STORED),
        MetadataField::CodeMeaning => None,
    }
}

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get the untrimmed text of a DICOM tag
///
/// Multi-valued elements come back joined with a backslash. Padding and NUL
/// bytes are preserved so callers apply their own cleanup.
pub fn get_raw_text(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.into_owned())
}

/// Helper to get u32 value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to u32
pub fn get_u32_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u32>().ok())
}

/// Extracts the protocol description
///
/// Navigates: PerformedProtocolCodeSequence[0] → CodeMeaning
pub fn get_protocol_code_meaning(dcm: &InMemDicomObject) -> Option<String> {
    dcm.element(PERFORMED_PROTOCOL_CODE_SEQUENCE)
        .ok()
        .and_then(|seq| seq.items())
        .and_then(|items| items.first())
        .and_then(|first_item| get_string_value(first_item, CODE_MEANING))
}
