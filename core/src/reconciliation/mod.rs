//! Cross-record reconciliation of acquisition geometry
//!
//! Every record exported for an acquisition carries its own copy of the
//! geometry, and some copies are incomplete or wrong. The reconciler runs the
//! extractor on each record, drops the implausible ones and averages the rest
//! into a single [`PropertySet`].

mod accumulator;

pub use accumulator::PropertyAccumulator;

use crate::error::Result;
use crate::extraction::{extract_properties, MetadataRecord};
use crate::types::{AcquisitionType, PropertySet, RecordProperties, MAX_SLICE_THICKNESS_MM};
use log::{debug, info, warn};

/// Smallest bit depth a record may report and still be averaged
pub const MIN_BIT_DEPTH: u16 = 4;

/// What to do with the remaining records once a sane record falls outside
/// the accepted bounds
///
/// Records failing the extractor's sanity checks are always skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum RejectionPolicy {
    /// Skip the rejected record and keep going
    #[default]
    SkipRecord,

    /// Stop at the first sane record outside the bounds, keeping only what
    /// came before it
    StopAtFirst,
}

/// Reconciles records with the default [`RejectionPolicy::SkipRecord`]
pub fn reconcile<'a, R, I>(acquisition: AcquisitionType, records: I) -> Result<PropertySet>
where
    R: MetadataRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    reconcile_with_policy(acquisition, records, RejectionPolicy::default())
}

/// Reconciles the geometry reported by several records
///
/// # Algorithm
///
/// 1. Extract properties from each record
/// 2. Reject records that are invalid, thicker than 1 mm, empty, or below
///    4 bits
/// 3. Average slice thickness, pixel width, pixel depth and bit depth
///    over the accepted records
/// 4. Take image width and depth from the first accepted record
///
/// # Errors
///
/// Returns [`crate::OctcatError::NoValidMetadata`] if no record is accepted.
pub fn reconcile_with_policy<'a, R, I>(
    acquisition: AcquisitionType,
    records: I,
    policy: RejectionPolicy,
) -> Result<PropertySet>
where
    R: MetadataRecord + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut accumulator = PropertyAccumulator::new();
    let mut rejected = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let props = match extract_properties(record, acquisition) {
            Ok(props) => props,
            Err(e) => {
                rejected += 1;
                debug!("Ignoring record {} for {}: {}", index, acquisition, e);
                continue;
            }
        };
        if !props.valid {
            rejected += 1;
            debug!(
                "Ignoring record {} for {}: failed sanity checks",
                index, acquisition
            );
            continue;
        }

        match out_of_bounds_reason(&props) {
            None => accumulator.push(&props),
            Some(reason) => {
                rejected += 1;
                debug!("Ignoring record {} for {}: {}", index, acquisition, reason);
                // A sane record outside the bounds ends the legacy fold
                if policy == RejectionPolicy::StopAtFirst {
                    warn!(
                        "Stopping reconciliation for {} at record {}: {}",
                        acquisition, index, reason
                    );
                    break;
                }
            }
        }
    }

    info!(
        "{}: {} records accepted, {} rejected",
        acquisition,
        accumulator.count(),
        rejected
    );
    accumulator.finish(acquisition)
}

/// Explains why a record's properties cannot be averaged, if they cannot
pub fn rejection_reason(props: &RecordProperties) -> Option<&'static str> {
    if !props.valid {
        Some("failed sanity checks")
    } else {
        out_of_bounds_reason(props)
    }
}

/// Bounds checked on records that passed the sanity checks
fn out_of_bounds_reason(props: &RecordProperties) -> Option<&'static str> {
    if props.slice_thickness_mm > MAX_SLICE_THICKNESS_MM {
        Some("slice thickness above 1 mm")
    } else if props.image_width_pixels < 1 || props.image_depth_pixels < 1 {
        Some("empty image")
    } else if props.bit_depth < MIN_BIT_DEPTH {
        Some("bit depth below 4")
    } else {
        None
    }
}
