//! States processing the fixed-stride record sections.

use core::marker::PhantomData;

use zerocopy::{
    FromBytes,
    byteorder::little_endian::{F32, F64},
};

use super::{
    header::Header,
    layout::{EXTENDED_MOTION_STRIDE, MOTION_STRIDE, POSITION_STRIDE},
};

/// Orientation/magnetometer channels of an extended motion record, in
/// degrees.
///
/// Each channel is NaN when the device had no compass fix. NaN is preserved
/// as recorded and means "no reading", never zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Orientation {
    /// Whether any channel carries a reading.
    pub fn has_fix(&self) -> bool {
        !(self.alpha.is_nan() && self.beta.is_nan() && self.gamma.is_nan())
    }
}

/// A timestamped accelerometer and gyroscope reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionSample {
    /// Epoch milliseconds.
    pub timestamp: f64,
    /// Linear acceleration in the device frame, in m/s².
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    /// Angular rate, in deg/s.
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
    /// Present only for extended (V3) records.
    pub orientation: Option<Orientation>,
}

impl MotionSample {
    /// Whether this sample carries at least one orientation reading.
    pub fn has_orientation_fix(&self) -> bool {
        self.orientation.is_some_and(|o| o.has_fix())
    }

    /// Roll angle estimated from the accelerometer, in degrees.
    pub fn roll_deg(&self) -> f64 {
        let (ax, ay, az) = (self.ax as f64, self.ay as f64, self.az as f64);
        ax.atan2((ay * ay + az * az).sqrt()).to_degrees()
    }
}

/// A timestamped satellite position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionSample {
    /// Epoch milliseconds.
    pub timestamp: f64,
    /// WGS-84 degrees.
    pub latitude: f64,
    pub longitude: f64,
    /// Ground speed, in m/s.
    pub speed: f32,
    /// Heading, in degrees.
    pub heading: f32,
    /// Horizontal accuracy, in meters.
    pub accuracy: f32,
}

/// The section a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Motion,
    Position,
    /// Raw motion samples taken while calibrating.
    Capture,
}

/// Records remaining in each section.
#[derive(Debug, Clone, Copy)]
struct Remaining {
    motion: u32,
    position: u32,
    capture: u32,
}

/// State token to select the next record.
#[derive(Debug)]
pub struct Records {
    remaining: Remaining,
    is_extended: bool,
}

impl Records {
    pub(super) fn new(header: &Header) -> Self {
        let layout = header.layout();

        Self {
            remaining: Remaining {
                motion: header.motion_count,
                position: header.position_count,
                capture: if layout.has_captures {
                    header.capture_count()
                } else {
                    0
                },
            },
            is_extended: layout.motion_stride == EXTENDED_MOTION_STRIDE,
        }
    }

    /// Transition to the state decoding the next record, in document order:
    /// every motion record, then every position record, then every capture
    /// record.
    ///
    /// Returns `None` once every declared record has been decoded.
    pub fn next(self) -> Option<AnyRecord> {
        let Remaining {
            motion,
            position,
            capture,
        } = self.remaining;

        let section = if motion != 0 {
            Section::Motion
        } else if position != 0 {
            Section::Position
        } else if capture != 0 {
            Section::Capture
        } else {
            return None;
        };

        let any = match (section, self.is_extended) {
            (Section::Position, _) => AnyRecord::Position(Record::new(self, section)),
            (_, false) => AnyRecord::Motion(Record::new(self, section)),
            (_, true) => AnyRecord::ExtendedMotion(Record::new(self, section)),
        };

        Some(any)
    }

    /// Number of records left to decode.
    pub fn remaining(&self) -> u64 {
        let Remaining {
            motion,
            position,
            capture,
        } = self.remaining;

        motion as u64 + position as u64 + capture as u64
    }
}

/// State token to decode a record of kind `T`.
#[derive(Debug)]
pub struct Record<T> {
    records: Records,
    section: Section,
    _phantom: PhantomData<T>,
}

impl<T: RecordInner> Record<T> {
    fn new(records: Records, section: Section) -> Self {
        Self {
            records,
            section,
            _phantom: PhantomData,
        }
    }

    /// The section this record belongs to.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Transition to another state by decoding a record of kind `T`.
    ///
    /// Returns the decoded sample and a successor state token.
    pub fn advance(self, r: T::From) -> (T::Into, Records) {
        let mut records = self.records;

        let count = match self.section {
            Section::Motion => &mut records.remaining.motion,
            Section::Position => &mut records.remaining.position,
            Section::Capture => &mut records.remaining.capture,
        };
        *count -= 1;

        (T::from(r), records)
    }
}

pub trait RecordInner {
    /// The bytes storing this record.
    type From;
    /// The sample decoded from this record.
    type Into;

    /// Convert the stored bytes to a sample.
    fn from(r: Self::From) -> Self::Into;
}

#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes)]
struct MotionFields {
    timestamp: F64,
    ax: F32,
    ay: F32,
    az: F32,
    gx: F32,
    gy: F32,
    gz: F32,
}

impl MotionFields {
    fn into_sample(self, orientation: Option<Orientation>) -> MotionSample {
        let Self {
            timestamp,
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
        } = self;

        MotionSample {
            timestamp: timestamp.get(),
            ax: ax.get(),
            ay: ay.get(),
            az: az.get(),
            gx: gx.get(),
            gy: gy.get(),
            gz: gz.get(),
            orientation,
        }
    }
}

/// A 32-byte motion record.
#[derive(Debug)]
pub struct Motion;

impl RecordInner for Motion {
    type From = [u8; MOTION_STRIDE];
    type Into = MotionSample;

    fn from(r: Self::From) -> Self::Into {
        let fields: MotionFields = zerocopy::transmute!(r);
        fields.into_sample(None)
    }
}

/// A 44-byte motion record with trailing orientation channels.
#[derive(Debug)]
pub struct ExtendedMotion;

impl RecordInner for ExtendedMotion {
    type From = [u8; EXTENDED_MOTION_STRIDE];
    type Into = MotionSample;

    fn from(r: Self::From) -> Self::Into {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct ExtendedFields {
            motion: MotionFields,
            alpha: F32,
            beta: F32,
            gamma: F32,
        }

        let ExtendedFields {
            motion,
            alpha,
            beta,
            gamma,
        } = zerocopy::transmute!(r);

        motion.into_sample(Some(Orientation {
            alpha: alpha.get(),
            beta: beta.get(),
            gamma: gamma.get(),
        }))
    }
}

/// A 36-byte position record.
#[derive(Debug)]
pub struct Position;

impl RecordInner for Position {
    type From = [u8; POSITION_STRIDE];
    type Into = PositionSample;

    fn from(r: Self::From) -> Self::Into {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct PositionFields {
            timestamp: F64,
            latitude: F64,
            longitude: F64,
            speed: F32,
            heading: F32,
            accuracy: F32,
        }

        let PositionFields {
            timestamp,
            latitude,
            longitude,
            speed,
            heading,
            accuracy,
        } = zerocopy::transmute!(r);

        PositionSample {
            timestamp: timestamp.get(),
            latitude: latitude.get(),
            longitude: longitude.get(),
            speed: speed.get(),
            heading: heading.get(),
            accuracy: accuracy.get(),
        }
    }
}

/// A `Record` state token for a record kind.
#[derive(Debug)]
pub enum AnyRecord {
    Motion(Record<Motion>),
    ExtendedMotion(Record<ExtendedMotion>),
    Position(Record<Position>),
}
