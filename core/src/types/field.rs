use std::fmt;

/// Named fields the pipeline reads from a metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum MetadataField {
    /// Distance between B-scans, used as slice thickness
    SliceSpacing,
    NumberOfFrames,
    /// Two components: pixel width, pixel depth
    PixelSpacing,
    Rows,
    Columns,
    BitsStored,
    /// Protocol description nested in the performed protocol code sequence
    CodeMeaning,
}

impl MetadataField {
    /// DICOM keyword of the underlying attribute
    pub fn keyword(&self) -> &'static str {
        match self {
            MetadataField::SliceSpacing => "SpacingBetweenSlices",
            MetadataField::NumberOfFrames => "NumberOfFrames",
            MetadataField::PixelSpacing => "PixelSpacing",
            MetadataField::Rows => "Rows",
            MetadataField::Columns => "Columns",
            MetadataField::BitsStored => "BitsStored",
            MetadataField::CodeMeaning => "CodeMeaning",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
