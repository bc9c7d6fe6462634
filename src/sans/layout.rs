//! Per-version layout constants.

/// A format version, selected once from the magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    V1,
    V2,
    /// Extended motion records carrying orientation channels.
    V3,
}

impl Version {
    /// All known versions, newest first.
    pub const ALL: [Version; 3] = [Version::V3, Version::V2, Version::V1];

    /// The layout constants for this version.
    pub const fn layout(self) -> &'static Layout {
        match self {
            Version::V1 => &V1,
            Version::V2 => &V2,
            Version::V3 => &V3,
        }
    }
}

/// Byte layout of a document for one format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Magic tag, matched as a prefix of the zero-trimmed leading bytes.
    pub magic: &'static str,
    /// Size of the header region, including the magic bytes.
    pub header_size: usize,
    /// Size of the calibration block, if this version can carry one.
    pub calibration_size: Option<usize>,
    /// Stride of motion (and calibration-capture) records.
    pub motion_stride: usize,
    /// Stride of position records.
    pub position_stride: usize,
    /// Whether a calibration-capture section follows the position records.
    pub has_captures: bool,
}

/// Length of the zero-padded magic region.
pub const MAGIC_SIZE: usize = 16;

pub(crate) const CALIBRATION_SIZE: usize = 64;
pub(crate) const MOTION_STRIDE: usize = 32;
pub(crate) const EXTENDED_MOTION_STRIDE: usize = 44;
pub(crate) const POSITION_STRIDE: usize = 36;

pub(crate) const V1_HEADER_SIZE: usize = 64;
pub(crate) const V2_HEADER_SIZE: usize = 128;

const V1: Layout = Layout {
    magic: "WRC_COACH_V1",
    header_size: V1_HEADER_SIZE,
    calibration_size: None,
    motion_stride: MOTION_STRIDE,
    position_stride: POSITION_STRIDE,
    has_captures: false,
};

const V2: Layout = Layout {
    magic: "WRC_COACH_V2",
    header_size: V2_HEADER_SIZE,
    calibration_size: Some(CALIBRATION_SIZE),
    motion_stride: MOTION_STRIDE,
    position_stride: POSITION_STRIDE,
    has_captures: true,
};

const V3: Layout = Layout {
    magic: "WRC_COACH_V3",
    header_size: V2_HEADER_SIZE,
    calibration_size: Some(CALIBRATION_SIZE),
    motion_stride: EXTENDED_MOTION_STRIDE,
    position_stride: POSITION_STRIDE,
    has_captures: true,
};
