//! States processing the magic bytes and the document header.

use either::Either::{self, Left, Right};
use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::little_endian::{F32, F64, U32},
};

use super::{
    calibration::CalibrationBlock,
    layout::{Layout, MAGIC_SIZE, V1_HEADER_SIZE, V2_HEADER_SIZE, Version},
    record::Records,
};

/// An error advancing over the magic bytes.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The zero-trimmed tag matches no known version prefix.
    #[error("Unrecognized format tag ({0:?}).")]
    UnrecognizedFormat(String),
}

/// Mount position of the recording device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceOrientation {
    /// Mounted facing the rower.
    #[default]
    Primary,
    /// Mounted facing the coxswain.
    Secondary,
}

impl From<u8> for DeviceOrientation {
    fn from(b: u8) -> Self {
        match b {
            1 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A decoded document header.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    pub version: Version,
    pub motion_count: u32,
    pub position_count: u32,
    /// Number of raw calibration-capture records. Absent before V2.
    pub calibration_capture_count: Option<u32>,
    /// Whether a calibration block follows the header. Absent before V2.
    pub has_calibration: Option<bool>,
    /// Session start, in epoch milliseconds.
    pub session_start: f64,
    pub device_orientation: DeviceOrientation,
    pub demo_mode: bool,
    pub catch_threshold: f32,
    pub finish_threshold: f32,
}

impl Header {
    /// The layout constants for this header's version.
    pub fn layout(&self) -> &'static Layout {
        self.version.layout()
    }

    /// Number of calibration-capture records, zero where unsupported.
    pub fn capture_count(&self) -> u32 {
        self.calibration_capture_count.unwrap_or(0)
    }

    /// Whether a calibration block is present.
    pub fn is_calibrated(&self) -> bool {
        self.has_calibration.unwrap_or(false)
    }

    /// The exact document length declared by this header.
    pub fn document_len(&self) -> u64 {
        let layout = self.layout();

        let calibration = match (self.is_calibrated(), layout.calibration_size) {
            (true, Some(size)) => size as u64,
            _ => 0,
        };

        let motion = (self.motion_count as u64 + self.capture_count() as u64)
            * layout.motion_stride as u64;
        let position = self.position_count as u64 * layout.position_stride as u64;

        layout.header_size as u64 + calibration + motion + position
    }
}

/// State token to decode the magic bytes.
#[derive(Debug)]
pub struct Magic;

impl Magic {
    /// Transition to another state by decoding the magic bytes.
    ///
    /// The tag is trimmed of trailing zero padding and matched by prefix, so
    /// trailing version suffixes are tolerated.
    ///
    /// Returns a successor state token for the version-specific header.
    pub fn advance(r: [u8; MAGIC_SIZE]) -> Result<Either<HeaderV1, HeaderV2>, FormatError> {
        let end = r.iter().rposition(|b| *b != 0).map_or(0, |p| p + 1);
        let tag = &r[..end];

        let version = Version::ALL
            .into_iter()
            .find(|v| tag.starts_with(v.layout().magic.as_bytes()))
            .ok_or_else(|| {
                FormatError::UnrecognizedFormat(String::from_utf8_lossy(tag).into_owned())
            })?;

        Ok(match version {
            Version::V1 => Left(HeaderV1(())),
            v => Right(HeaderV2(v)),
        })
    }
}

/// State token to decode the remainder of a V1 header.
#[derive(Debug)]
pub struct HeaderV1(pub(super) ());

impl HeaderV1 {
    /// Transition to another state by decoding the header fields following
    /// the magic bytes.
    ///
    /// Returns the header and a successor state token.
    pub fn advance(self, r: [u8; V1_HEADER_SIZE - MAGIC_SIZE]) -> (Header, Records) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct HeaderFields {
            motion_count: U32,
            position_count: U32,
            session_start: F64,
            device_orientation: u8,
            demo_mode: u8,
            catch_threshold: F32,
            finish_threshold: F32,
            _reserved: [u8; 22],
        }

        let HeaderFields {
            motion_count,
            position_count,
            session_start,
            device_orientation,
            demo_mode,
            catch_threshold,
            finish_threshold,
            ..
        } = zerocopy::transmute!(r);

        let header = Header {
            version: Version::V1,
            motion_count: motion_count.get(),
            position_count: position_count.get(),
            calibration_capture_count: None,
            has_calibration: None,
            session_start: session_start.get(),
            device_orientation: device_orientation.into(),
            demo_mode: demo_mode == 1,
            catch_threshold: catch_threshold.get(),
            finish_threshold: finish_threshold.get(),
        };

        (header, Records::new(&header))
    }
}

/// State token to decode the remainder of a V2 or V3 header.
#[derive(Debug)]
pub struct HeaderV2(pub(super) Version);

impl HeaderV2 {
    /// Transition to another state by decoding the header fields following
    /// the magic bytes.
    ///
    /// Returns the header and a successor state token, which decodes the
    /// calibration block when one is present.
    pub fn advance(
        self,
        r: [u8; V2_HEADER_SIZE - MAGIC_SIZE],
    ) -> (Header, Either<CalibrationBlock, Records>) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct HeaderFields {
            motion_count: U32,
            position_count: U32,
            capture_count: U32,
            has_calibration: u8,
            session_start: F64,
            device_orientation: u8,
            demo_mode: u8,
            catch_threshold: F32,
            finish_threshold: F32,
            _reserved: [u8; 81],
        }

        let HeaderFields {
            motion_count,
            position_count,
            capture_count,
            has_calibration,
            session_start,
            device_orientation,
            demo_mode,
            catch_threshold,
            finish_threshold,
            ..
        } = zerocopy::transmute!(r);

        let header = Header {
            version: self.0,
            motion_count: motion_count.get(),
            position_count: position_count.get(),
            calibration_capture_count: Some(capture_count.get()),
            has_calibration: Some(has_calibration == 1),
            session_start: session_start.get(),
            device_orientation: device_orientation.into(),
            demo_mode: demo_mode == 1,
            catch_threshold: catch_threshold.get(),
            finish_threshold: finish_threshold.get(),
        };

        let records = Records::new(&header);

        let successor = if header.is_calibrated() {
            Left(CalibrationBlock(records))
        } else {
            Right(records)
        };

        (header, successor)
    }
}
