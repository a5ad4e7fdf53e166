use crate::pipeline::BatchReport;
use crate::types::{AcquisitionType, PropertySet};
use std::fmt;

/// Reconciled geometry of one acquisition, lengths in micrometers
pub struct PropertyReport<'a> {
    acquisition: AcquisitionType,
    properties: &'a PropertySet,
}

impl<'a> PropertyReport<'a> {
    pub fn new(acquisition: AcquisitionType, properties: &'a PropertySet) -> Self {
        Self {
            acquisition,
            properties,
        }
    }
}

impl<'a> fmt::Display for PropertyReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let props = self.properties;
        writeln!(f, "== {} ==", self.acquisition)?;
        writeln!(
            f,
            "Slice Thickness: {:.1} um",
            props.slice_thickness_mm * 1000.0
        )?;
        writeln!(f, "Pixel Width:     {:.1} um", props.pixel_width_mm * 1000.0)?;
        writeln!(f, "Pixel Depth:     {:.1} um", props.pixel_depth_mm * 1000.0)?;
        writeln!(f, "Width (pixels):  {}", props.image_width_pixels)?;
        writeln!(f, "Depth (pixels):  {}", props.image_depth_pixels)?;
        writeln!(f, "Bit Depth:       {}", props.bit_depth)?;
        Ok(())
    }
}

/// Text report formatter for a conversion batch
pub struct TextReport<'a> {
    report: &'a BatchReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a BatchReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OCT Conversion")?;
        writeln!(f, "==============")?;
        writeln!(f)?;

        for outcome in &self.report.outcomes {
            writeln!(f, "{}", outcome.directory.display())?;
            match &outcome.result {
                Ok(conversion) => {
                    write!(
                        f,
                        "{}",
                        PropertyReport::new(outcome.acquisition, &conversion.properties)
                    )?;
                    let (width, depth, slices) = conversion.dim;
                    writeln!(f, "Volume:          {}x{}x{}", width, depth, slices)?;
                    writeln!(f, "Output:          {}", conversion.output_path.display())?;
                }
                Err(failure) => {
                    writeln!(f, "== {} ==", outcome.acquisition)?;
                    writeln!(f, "Failed ({}): {}", failure.kind, failure.message)?;
                }
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "{} converted, {} failed",
            self.report.succeeded(),
            self.report.failed()
        )?;
        Ok(())
    }
}
