use crate::error::OctcatError;
use std::fmt;
use std::str::FromStr;

/// Frame count every Macular Cube acquisition reports
pub const MACULAR_CUBE_FRAMES: u32 = 128;

/// OCT acquisition protocols exported by the device
///
/// The acquisition type decides which raw file belongs to a request, which
/// metadata records describe it, which sanity checks apply during extraction
/// and what the output volume is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum AcquisitionType {
    MacularCube,
    Angiography3x3,
    Angiography8x8,
}

impl AcquisitionType {
    /// Every supported acquisition type, in batch processing order
    pub const ALL: [AcquisitionType; 3] = [
        AcquisitionType::MacularCube,
        AcquisitionType::Angiography8x8,
        AcquisitionType::Angiography3x3,
    ];

    /// Label used by the device in file names and in the protocol code meaning
    pub fn label(&self) -> &'static str {
        match self {
            AcquisitionType::MacularCube => "Macular Cube",
            AcquisitionType::Angiography3x3 => "Angiography 3x3",
            AcquisitionType::Angiography8x8 => "Angiography 8x8",
        }
    }

    /// Command-line friendly name
    pub fn simple_name(&self) -> &'static str {
        match self {
            AcquisitionType::MacularCube => "macular-cube",
            AcquisitionType::Angiography3x3 => "angiography-3x3",
            AcquisitionType::Angiography8x8 => "angiography-8x8",
        }
    }

    /// Output file stem
    pub fn output_stem(&self) -> &'static str {
        match self {
            AcquisitionType::MacularCube => "macularCube",
            AcquisitionType::Angiography3x3 => "angiography3x3",
            AcquisitionType::Angiography8x8 => "angiography8x8",
        }
    }

    /// Output file name, including the NIfTI extension
    pub fn output_file_name(&self) -> String {
        format!("{}.nii", self.output_stem())
    }

    /// Marker the raw export file name carries for this protocol
    pub fn raw_file_marker(&self) -> &'static str {
        match self {
            AcquisitionType::MacularCube => "cube_raw",
            AcquisitionType::Angiography3x3 | AcquisitionType::Angiography8x8 => "FlowCube_raw",
        }
    }

    /// Checks whether a raw export file name belongs to this acquisition type
    ///
    /// Both the raw marker and the protocol label must appear in the name.
    pub fn matches_raw_file_name(&self, file_name: &str) -> bool {
        file_name.contains(self.raw_file_marker()) && file_name.contains(self.label())
    }

    /// Whether this is an OCT angiography protocol (isotropic voxels in-plane)
    pub fn is_angiography(&self) -> bool {
        matches!(
            self,
            AcquisitionType::Angiography3x3 | AcquisitionType::Angiography8x8
        )
    }

    /// Frame count fixed by the protocol, when there is one
    pub fn expected_frame_count(&self) -> Option<u32> {
        match self {
            AcquisitionType::MacularCube => Some(MACULAR_CUBE_FRAMES),
            AcquisitionType::Angiography3x3 | AcquisitionType::Angiography8x8 => None,
        }
    }
}

impl fmt::Display for AcquisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AcquisitionType {
    type Err = OctcatError;

    /// Accepts the device label, the command-line name or the output stem,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| {
                [t.label(), t.simple_name(), t.output_stem()]
                    .iter()
                    .any(|name| name.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| OctcatError::UnknownAcquisitionType(s.to_string()))
    }
}
