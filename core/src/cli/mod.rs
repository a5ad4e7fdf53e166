pub mod report;

use crate::pipeline::PipelineOptions;
use crate::reconciliation::RejectionPolicy;
use crate::types::AcquisitionType;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for octcat
#[derive(Parser, Debug)]
#[command(name = "octcat")]
#[command(about = "Convert exported Zeiss Cirrus OCT scans to NIfTI volumes")]
#[command(version)]
pub struct Cli {
    /// Data directory holding the extracted export
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Acquisition type to convert
    #[arg(short = 't', long, default_value = "all")]
    pub scan_type: ScanTypeArg,

    /// Treat every RIDE_ subdirectory below the input as a data directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Stop averaging at the first rejected record
    #[arg(long)]
    pub stop_at_first_rejection: bool,

    /// Summary format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Pipeline configuration selected by the flags
    pub fn pipeline_options(&self) -> PipelineOptions {
        let policy = if self.stop_at_first_rejection {
            RejectionPolicy::StopAtFirst
        } else {
            RejectionPolicy::SkipRecord
        };
        PipelineOptions::new().with_rejection_policy(policy)
    }
}

/// Scan type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanTypeArg {
    /// Macular Cube 512x128
    MacularCube,
    /// Angiography 3x3 mm
    #[value(name = "angiography-3x3")]
    Angiography3x3,
    /// Angiography 8x8 mm
    #[value(name = "angiography-8x8")]
    Angiography8x8,
    /// Every supported type
    All,
}

impl ScanTypeArg {
    /// Acquisition types to convert, in processing order
    pub fn acquisitions(&self) -> Vec<AcquisitionType> {
        match self {
            ScanTypeArg::MacularCube => vec![AcquisitionType::MacularCube],
            ScanTypeArg::Angiography3x3 => vec![AcquisitionType::Angiography3x3],
            ScanTypeArg::Angiography8x8 => vec![AcquisitionType::Angiography8x8],
            ScanTypeArg::All => AcquisitionType::ALL.to_vec(),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["octcat", "-i", "/data/export"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("/data/export"));
        assert_eq!(cli.scan_type, ScanTypeArg::All);
        assert!(!cli.recursive);
        assert!(matches!(cli.format, OutputFormat::Text));
        assert_eq!(
            cli.pipeline_options().rejection_policy,
            RejectionPolicy::SkipRecord
        );
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["octcat"]).is_err());
    }

    #[rstest]
    #[case("macular-cube", vec![AcquisitionType::MacularCube])]
    #[case("angiography-3x3", vec![AcquisitionType::Angiography3x3])]
    #[case("angiography-8x8", vec![AcquisitionType::Angiography8x8])]
    #[case("all", vec![
        AcquisitionType::MacularCube,
        AcquisitionType::Angiography8x8,
        AcquisitionType::Angiography3x3,
    ])]
    fn test_scan_type(#[case] arg: &str, #[case] expected: Vec<AcquisitionType>) {
        let cli = Cli::try_parse_from(["octcat", "-i", ".", "-t", arg]).unwrap();
        assert_eq!(cli.scan_type.acquisitions(), expected);
    }

    #[test]
    fn test_unknown_scan_type_is_rejected() {
        assert!(Cli::try_parse_from(["octcat", "-i", ".", "-t", "fundus"]).is_err());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "octcat",
            "--input",
            "exports",
            "-r",
            "--stop-at-first-rejection",
            "-f",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(cli.recursive);
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(
            cli.pipeline_options().rejection_policy,
            RejectionPolicy::StopAtFirst
        );
    }
}
