use regex::Regex;
use std::sync::OnceLock;

/// Parses a decimal value from device-written text
///
/// The exporter pads numeric strings with spaces, stray bytes and NUL
/// terminators. Everything after the first NUL is ignored. A well-formed
/// number, exponent notation included, is parsed as is; otherwise every
/// character outside `[0-9.]` is dropped and the remainder is parsed.
///
/// Returns `None` when nothing parseable is left.
pub fn parse_decimal(text: &str) -> Option<f64> {
    static REGEX: OnceLock<Regex> = OnceLock::new();

    let head = text.split('\0').next().unwrap_or_default().trim();
    if let Ok(value) = head.parse::<f64>() {
        if value.is_finite() {
            return Some(value);
        }
    }

    let re = REGEX.get_or_init(|| Regex::new(r"[^0-9.]").expect("Failed to compile regex"));
    let cleaned = re.replace_all(head, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
