pub mod properties;
pub mod record;
pub mod tags;

pub use properties::extract_properties;
pub use record::MetadataRecord;
pub use tags::*;
