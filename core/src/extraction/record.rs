use crate::types::MetadataField;
use dicom_object::InMemDicomObject;

use super::tags::{get_protocol_code_meaning, get_raw_text, get_u32_value, tag_for};

/// Read-only view of a structured metadata record
///
/// Decoding lives behind this trait; the pipeline only ever asks for named
/// fields, either as raw text or as an unsigned integer.
pub trait MetadataRecord {
    /// Raw text of a field, or `None` when the field is absent or undecodable
    fn field_text(&self, field: MetadataField) -> Option<String>;

    /// Integer value of a field, or `None` when absent or not an integer
    fn field_u32(&self, field: MetadataField) -> Option<u32>;

    /// Free-text acquisition description
    fn acquisition_description(&self) -> Option<String> {
        self.field_text(MetadataField::CodeMeaning)
    }
}

impl MetadataRecord for InMemDicomObject {
    fn field_text(&self, field: MetadataField) -> Option<String> {
        match tag_for(field) {
            Some(tag) => get_raw_text(self, tag),
            None => get_protocol_code_meaning(self),
        }
    }

    fn field_u32(&self, field: MetadataField) -> Option<u32> {
        tag_for(field).and_then(|tag| get_u32_value(self, tag))
    }
}

impl<R: MetadataRecord + ?Sized> MetadataRecord for &R {
    fn field_text(&self, field: MetadataField) -> Option<String> {
        (**self).field_text(field)
    }

    fn field_u32(&self, field: MetadataField) -> Option<u32> {
        (**self).field_u32(field)
    }
}
