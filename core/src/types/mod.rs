//! Core type definitions for OCT volume conversion
//!
//! This module provides the fundamental types used throughout the octcat library:
//! - [`AcquisitionType`]: The supported scan protocols (Macular Cube, Angiography 3x3/8x8)
//! - [`MetadataField`]: Named geometry fields read from metadata records
//! - [`PixelSpacing`]: Two-component in-plane spacing
//! - [`RecordProperties`]: Geometry read from one record, with its validity flag
//! - [`PropertySet`]: Reconciled geometry for one acquisition

mod acquisition;
mod decimal;
mod field;
mod pixel_spacing;
mod properties;

pub use acquisition::{AcquisitionType, MACULAR_CUBE_FRAMES};
pub use decimal::parse_decimal;
pub use field::MetadataField;
pub use pixel_spacing::PixelSpacing;
pub use properties::{
    PropertySet, RecordProperties, EXPECTED_BIT_DEPTH, ISOTROPY_TOLERANCE_MM,
    MAX_SLICE_THICKNESS_MM, MISSING_VALUE,
};
