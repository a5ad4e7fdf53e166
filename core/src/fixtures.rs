//! In-memory DICOM records for unit tests

use crate::extraction::tags::{
    BITS_STORED, CODE_MEANING, COLUMNS, NUMBER_OF_FRAMES, PERFORMED_PROTOCOL_CODE_SEQUENCE,
    PIXEL_SPACING, ROWS, SPACING_BETWEEN_SLICES,
};
use dicom_core::value::{DataSetSequence, PrimitiveValue};
use dicom_core::{DataElement, VR};
use dicom_object::InMemDicomObject;

/// Builder for a Zeiss-style OCT metadata record
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    slice_spacing: Option<String>,
    frames: Option<String>,
    pixel_spacing: Option<Vec<String>>,
    rows: Option<u16>,
    columns: Option<u16>,
    bits_stored: Option<u16>,
    code_meaning: Option<String>,
}

impl RecordBuilder {
    fn new(slice: &str, frames: &str, spacing: [&str; 2], rows: u16, meaning: &str) -> Self {
        Self {
            slice_spacing: Some(slice.to_string()),
            frames: Some(frames.to_string()),
            pixel_spacing: Some(spacing.iter().map(|s| s.to_string()).collect()),
            rows: Some(rows),
            columns: Some(1024),
            bits_stored: Some(8),
            code_meaning: Some(meaning.to_string()),
        }
    }

    pub fn macular_cube() -> Self {
        Self::new("0.047", "128", ["0.011", "0.002"], 512, "Macular Cube 512x128")
    }

    pub fn angiography_3x3() -> Self {
        Self::new("0.0117", "245", ["0.0117", "0.0019"], 245, "Angiography 3x3 mm")
    }

    pub fn angiography_8x8() -> Self {
        Self::new("0.0313", "256", ["0.0313", "0.0019"], 256, "Angiography 8x8 mm")
    }

    pub fn slice_spacing(mut self, value: Option<&str>) -> Self {
        self.slice_spacing = value.map(str::to_string);
        self
    }

    pub fn frames(mut self, value: Option<&str>) -> Self {
        self.frames = value.map(str::to_string);
        self
    }

    pub fn pixel_spacing(mut self, parts: &[&str]) -> Self {
        self.pixel_spacing = Some(parts.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn without_pixel_spacing(mut self) -> Self {
        self.pixel_spacing = None;
        self
    }

    pub fn rows(mut self, value: Option<u16>) -> Self {
        self.rows = value;
        self
    }

    pub fn columns(mut self, value: Option<u16>) -> Self {
        self.columns = value;
        self
    }

    pub fn bits_stored(mut self, value: Option<u16>) -> Self {
        self.bits_stored = value;
        self
    }

    pub fn code_meaning(mut self, value: Option<&str>) -> Self {
        self.code_meaning = value.map(str::to_string);
        self
    }

    pub fn build(&self) -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();

        if let Some(v) = &self.slice_spacing {
            dcm.put(DataElement::new(
                SPACING_BETWEEN_SLICES,
                VR::DS,
                PrimitiveValue::from(v.as_str()),
            ));
        }
        if let Some(v) = &self.frames {
            dcm.put(DataElement::new(
                NUMBER_OF_FRAMES,
                VR::IS,
                PrimitiveValue::from(v.as_str()),
            ));
        }
        if let Some(parts) = &self.pixel_spacing {
            dcm.put(DataElement::new(
                PIXEL_SPACING,
                VR::DS,
                PrimitiveValue::Strs(parts.clone().into()),
            ));
        }
        for (tag, value) in [
            (ROWS, self.rows),
            (COLUMNS, self.columns),
            (BITS_STORED, self.bits_stored),
        ] {
            if let Some(v) = value {
                dcm.put(DataElement::new(tag, VR::US, PrimitiveValue::from(v)));
            }
        }
        if let Some(meaning) = &self.code_meaning {
            let item = InMemDicomObject::from_element_iter([DataElement::new(
                CODE_MEANING,
                VR::LO,
                PrimitiveValue::from(meaning.as_str()),
            )]);
            dcm.put(DataElement::new(
                PERFORMED_PROTOCOL_CODE_SEQUENCE,
                VR::SQ,
                DataSetSequence::from(vec![item]),
            ));
        }

        dcm
    }
}
