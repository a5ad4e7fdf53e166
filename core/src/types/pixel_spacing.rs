use super::decimal::parse_decimal;
use std::fmt;

/// In-plane pixel spacing of a B-scan in millimeters
///
/// The first component runs across the scan (pixel width), the second along
/// the A-scan (pixel depth).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    pub width: f64,
    pub depth: f64,
}

impl PixelSpacing {
    /// Creates a new PixelSpacing
    pub fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }

    /// Parses pixel spacing from raw field text
    ///
    /// Accepts formats like:
    /// - "0.0117\\0.0020"
    /// - "[0.0117, 0.0020]"
    /// - padded or NUL-terminated variants of either
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two components are present or either
    /// component has no parseable number after cleanup
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut components = s
            .split(|c: char| c == '\\' || c == ',')
            .filter(|part| !part.trim_matches(|c: char| c.is_whitespace() || c == '\0').is_empty());

        let width_str = components
            .next()
            .ok_or_else(|| format!("Failed to parse PixelSpacing from '{}'", s))?;
        let depth_str = components
            .next()
            .ok_or_else(|| format!("Failed to parse PixelSpacing from '{}'", s))?;

        let width = parse_decimal(width_str)
            .ok_or_else(|| format!("Failed to parse width value from '{}'", width_str))?;
        let depth = parse_decimal(depth_str)
            .ok_or_else(|| format!("Failed to parse depth value from '{}'", depth_str))?;

        Ok(PixelSpacing { width, depth })
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.width, self.depth)
    }
}
