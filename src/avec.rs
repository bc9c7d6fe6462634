//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode whole documents from data slices and
//! readers, returning the header and calibration and publishing every record
//! to the [`FromSamples`] trait as it is decoded. [`crate::Session`]
//! implements the common case of collecting everything into owned arrays.
//!
//! Decoding is all-or-nothing: on error, samples already published belong to
//! a document that failed to decode and should be discarded.

pub mod reader;
pub mod slice;

pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use crate::sans::record::{MotionSample, PositionSample, Section};

/// Receive samples for a document.
///
/// Samples arrive in document order: every motion sample, then every position
/// sample, then every calibration-capture sample. NaN orientation channels are
/// published as recorded.
///
/// The default implementation of each method ignores received samples.
#[allow(unused_variables)]
pub trait FromSamples {
    /// Add a motion sample.
    fn add_motion(&mut self, sample: MotionSample) {}
    /// Add a position sample.
    fn add_position(&mut self, sample: PositionSample) {}
    /// Add a raw motion sample captured while calibrating.
    fn add_capture(&mut self, sample: MotionSample) {}
}

fn publish_motion<O: FromSamples + ?Sized>(o: &mut O, section: Section, sample: MotionSample) {
    match section {
        Section::Capture => o.add_capture(sample),
        _ => o.add_motion(sample),
    }
}

fn publish_position<O: FromSamples + ?Sized>(o: &mut O, _: Section, sample: PositionSample) {
    o.add_position(sample)
}
