//! States processing the calibration block.

use zerocopy::{
    FromBytes,
    byteorder::little_endian::{F32, F64, U32},
};

use super::{layout::CALIBRATION_SIZE, record::Records};

/// Mounting calibration captured before a session.
///
/// Values are passed through as recorded, without plausibility checks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Detected pitch, in degrees.
    pub pitch_offset: f32,
    /// Detected roll, in degrees.
    pub roll_offset: f32,
    /// Yaw offset, in degrees.
    pub yaw_offset: f32,
    /// Lateral position offset, in meters.
    pub lateral_offset: f32,
    /// Measured gravity magnitude, in m/s².
    pub gravity_magnitude: f32,
    /// Number of samples averaged.
    pub samples: u32,
    /// Sample variance. Lower is better.
    pub variance: f32,
    /// Capture time, in epoch milliseconds.
    pub timestamp: f64,
}

/// Coarse classification of a calibration's variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    Good,
    Fair,
    Poor,
}

impl Calibration {
    /// Classify the capture by its variance.
    pub fn quality(&self) -> Quality {
        if self.variance < 0.01 {
            Quality::Good
        } else if self.variance < 0.05 {
            Quality::Fair
        } else {
            Quality::Poor
        }
    }
}

/// State token to decode a calibration block.
#[derive(Debug)]
pub struct CalibrationBlock(pub(super) Records);

impl CalibrationBlock {
    /// Transition to another state by decoding a calibration block.
    ///
    /// Returns the calibration and a successor state token.
    pub fn advance(self, r: [u8; CALIBRATION_SIZE]) -> (Calibration, Records) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct CalibrationFields {
            pitch_offset: F32,
            roll_offset: F32,
            yaw_offset: F32,
            lateral_offset: F32,
            gravity_magnitude: F32,
            samples: U32,
            variance: F32,
            timestamp: F64,
            _reserved: [u8; 28],
        }

        let CalibrationFields {
            pitch_offset,
            roll_offset,
            yaw_offset,
            lateral_offset,
            gravity_magnitude,
            samples,
            variance,
            timestamp,
            ..
        } = zerocopy::transmute!(r);

        let calibration = Calibration {
            pitch_offset: pitch_offset.get(),
            roll_offset: roll_offset.get(),
            yaw_offset: yaw_offset.get(),
            lateral_offset: lateral_offset.get(),
            gravity_magnitude: gravity_magnitude.get(),
            samples: samples.get(),
            variance: variance.get(),
            timestamp: timestamp.get(),
        };

        (calibration, self.0)
    }
}
