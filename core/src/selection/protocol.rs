use crate::extraction::MetadataRecord;
use crate::types::AcquisitionType;
use log::debug;

/// Selects the records that describe an acquisition type
///
/// A record is kept when its protocol description contains the acquisition
/// type's label. Records without a readable description are skipped. An
/// empty result is not an error here; the reconciler reports it.
///
/// # Arguments
///
/// * `records` - Records exported for one scan session
/// * `acquisition` - Requested acquisition type
///
/// # Returns
///
/// References to the matching records, in input order
pub fn select_records<R: MetadataRecord>(
    records: &[R],
    acquisition: AcquisitionType,
) -> Vec<&R> {
    let selected: Vec<&R> = records
        .iter()
        .filter(|record| matches_acquisition(*record, acquisition))
        .collect();
    debug!(
        "{} of {} records describe {}",
        selected.len(),
        records.len(),
        acquisition
    );
    selected
}

/// Checks if a record describes the given acquisition type
pub fn matches_acquisition<R: MetadataRecord + ?Sized>(
    record: &R,
    acquisition: AcquisitionType,
) -> bool {
    record
        .acquisition_description()
        .is_some_and(|meaning| meaning.contains(acquisition.label()))
}
