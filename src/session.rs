//! Owned, decoded documents.

use std::{fs::File, io::BufReader, io::Read, path::Path};

use crate::{
    avec::{self, FromSamples},
    sans::{
        calibration::Calibration,
        header::Header,
        record::{MotionSample, PositionSample},
    },
};

/// A fully decoded document.
///
/// Arrays keep the order records were written in; nothing is sorted or
/// filtered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub header: Header,
    pub calibration: Option<Calibration>,
    pub motion: Vec<MotionSample>,
    pub positions: Vec<PositionSample>,
    /// Raw motion samples captured while calibrating.
    pub captures: Vec<MotionSample>,
}

#[derive(Debug, Default)]
struct Samples {
    motion: Vec<MotionSample>,
    positions: Vec<PositionSample>,
    captures: Vec<MotionSample>,
}

impl FromSamples for Samples {
    fn add_motion(&mut self, sample: MotionSample) {
        self.motion.push(sample);
    }

    fn add_position(&mut self, sample: PositionSample) {
        self.positions.push(sample);
    }

    fn add_capture(&mut self, sample: MotionSample) {
        self.captures.push(sample);
    }
}

impl Session {
    fn new((header, calibration): (Header, Option<Calibration>), samples: Samples) -> Self {
        let Samples {
            motion,
            positions,
            captures,
        } = samples;

        Self {
            header,
            calibration,
            motion,
            positions,
            captures,
        }
    }

    /// Decode a whole document held in memory.
    pub fn from_slice(r: &[u8]) -> Result<Self, avec::slice::Error> {
        let mut samples = Samples::default();
        let preamble = avec::decode_slice(r, &mut samples)?;

        Ok(Self::new(preamble, samples))
    }

    /// Decode a whole document from a reader.
    pub fn from_reader(r: &mut impl Read) -> Result<Self, avec::reader::Error> {
        let mut samples = Samples::default();
        let preamble = avec::decode_reader(r, &mut samples)?;

        Ok(Self::new(preamble, samples))
    }

    /// Decode a whole document from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, avec::reader::Error> {
        let mut file = BufReader::new(File::open(path)?);
        Self::from_reader(&mut file)
    }

    /// Motion sample times, in seconds since the first motion sample.
    pub fn motion_times(&self) -> Vec<f64> {
        relative_times(&self.motion, |s| s.timestamp, self.motion_origin())
    }

    /// Position sample times, in seconds since the first motion sample, or
    /// since the first position sample when there is no motion.
    pub fn position_times(&self) -> Vec<f64> {
        let origin = self
            .motion_origin()
            .or_else(|| self.positions.first().map(|s| s.timestamp));

        relative_times(&self.positions, |s| s.timestamp, origin)
    }

    /// Capture sample times, in seconds since the first capture sample.
    pub fn capture_times(&self) -> Vec<f64> {
        let origin = self.captures.first().map(|s| s.timestamp);
        relative_times(&self.captures, |s| s.timestamp, origin)
    }

    /// Seconds between the first and last motion sample.
    pub fn duration_s(&self) -> f64 {
        match (self.motion.first(), self.motion.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp) / 1000.0,
            _ => 0.0,
        }
    }

    /// Motion sample rate estimated from the sample count and duration, in Hz.
    pub fn sample_rate(&self) -> Option<f64> {
        let duration = self.duration_s();
        (duration > 0.0).then(|| self.motion.len() as f64 / duration)
    }

    /// Number of motion samples carrying an orientation reading, and the total
    /// number of motion samples.
    pub fn orientation_coverage(&self) -> (usize, usize) {
        let with_fix = self
            .motion
            .iter()
            .filter(|s| s.has_orientation_fix())
            .count();

        (with_fix, self.motion.len())
    }

    /// The fore-aft acceleration channel.
    pub fn fore_aft(&self) -> Vec<f32> {
        self.motion.iter().map(|s| s.ay).collect()
    }

    fn motion_origin(&self) -> Option<f64> {
        self.motion.first().map(|s| s.timestamp)
    }
}

fn relative_times<T>(samples: &[T], time: impl Fn(&T) -> f64, origin: Option<f64>) -> Vec<f64> {
    let Some(origin) = origin else {
        return Vec::new();
    };

    samples
        .iter()
        .map(|s| (time(s) - origin) / 1000.0)
        .collect()
}
