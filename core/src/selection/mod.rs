//! Metadata record loading and protocol selection
//!
//! Loads the DICOM records exported alongside a raw scan and keeps the ones
//! describing a requested acquisition type.

mod protocol;
mod record;

pub use protocol::{matches_acquisition, select_records};
pub use record::{load_records, OctRecord};
