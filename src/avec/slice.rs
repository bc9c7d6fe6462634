//! Slice-based decoder implementation.

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    calibration::Calibration,
    header::{FormatError, Header},
    record::{AnyRecord, Record, RecordInner, Records, Section},
};

use super::{FromSamples, publish_motion, publish_position};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// The magic bytes match no known version.
    #[error("Unrecognized format tag ({0:?}).")]
    UnrecognizedFormat(String),
    /// Fewer bytes remain than the next section requires.
    #[error("Truncated data: expected {expected} bytes, {available} available.")]
    TruncatedData { expected: usize, available: usize },
    /// The slice is too short to hold the magic bytes.
    #[error("Malformed header: {available} bytes is too short for the magic bytes.")]
    MalformedHeader { available: usize },
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::UnrecognizedFormat(tag) => Self::UnrecognizedFormat(tag),
        }
    }
}

/// Decode a document from a slice, publishing samples to a receiver.
///
/// Returns the header and, when present, the calibration.
///
/// This method is also re-exported as `wrcdata::avec::decode_slice`.
pub fn decode(
    r: &[u8],
    o: &mut impl FromSamples,
) -> Result<(Header, Option<Calibration>), Error> {
    let i = &mut 0; // Offset of the next unread byte.

    let magic = take(r, i).map_err(|_| Error::MalformedHeader { available: r.len() })?;

    let (header, calibration, mut records) = match Decoder::advance(magic)? {
        Left(state) => {
            let (header, records) = state.advance(take(r, i)?);
            (header, None, records)
        }
        Right(state) => match state.advance(take(r, i)?) {
            (header, Left(state)) => {
                let (calibration, records) = state.advance(take(r, i)?);
                (header, Some(calibration), records)
            }
            (header, Right(records)) => (header, None, records),
        },
    };

    log::debug!(
        "Decoding {:?} document: {} motion, {} position, {} capture records, calibrated: {}.",
        header.version,
        header.motion_count,
        header.position_count,
        header.capture_count(),
        calibration.is_some(),
    );

    while let Some(record) = records.next() {
        records = match record {
            AnyRecord::Motion(s) => decode_record(s, r, i, o, publish_motion)?,
            AnyRecord::ExtendedMotion(s) => decode_record(s, r, i, o, publish_motion)?,
            AnyRecord::Position(s) => decode_record(s, r, i, o, publish_position)?,
        };
    }

    if *i < r.len() {
        log::warn!(
            "{} bytes follow the last declared record and were ignored.",
            r.len() - *i
        );
    }

    Ok((header, calibration))
}

fn decode_record<T: RecordInner<From = [u8; N]>, O: FromSamples, const N: usize>(
    state: Record<T>,
    r: &[u8],
    i: &mut usize,
    o: &mut O,
    add: fn(&mut O, Section, T::Into),
) -> Result<Records, Error> {
    let section = state.section();
    let (sample, successor) = state.advance(take(r, i)?);

    add(o, section, sample);

    Ok(successor)
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let rest = r.get(*i..).unwrap_or_default();

    let bytes = rest.first_chunk::<N>().ok_or(Error::TruncatedData {
        expected: N,
        available: rest.len(),
    })?;
    *i += N;

    Ok(*bytes)
}
