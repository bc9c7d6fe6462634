//! Reader-based decoder implementation.

use std::io::{self, ErrorKind, Read};

use either::Either::{Left, Right};
use thiserror::Error;

use crate::sans::{
    Decoder,
    calibration::Calibration,
    header::{FormatError, Header},
    record::{AnyRecord, Record, RecordInner, Records, Section},
};

use super::{FromSamples, publish_motion, publish_position};

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The magic bytes match no known version.
    #[error("Unrecognized format tag ({0:?}).")]
    UnrecognizedFormat(String),
    /// The reader ended before the next section was complete.
    #[error("Truncated data: expected {expected} bytes, {available} available.")]
    TruncatedData { expected: usize, available: usize },
    /// The reader ended before the magic bytes were complete.
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

/// Decode a document from a reader, publishing samples to a receiver.
///
/// Returns the header and, when present, the calibration. Bytes following the
/// last declared record are drained and ignored.
///
/// This method is also re-exported as `wrcdata::avec::decode_reader`.
pub fn decode(
    r: &mut impl Read,
    o: &mut impl FromSamples,
) -> Result<(Header, Option<Calibration>), Error> {
    let magic = take(r).map_err(|err| match err {
        Error::TruncatedData { available, .. } => Error::MalformedHeader { available },
        err => err,
    })?;

    let (header, calibration, mut records) = match Decoder::advance(magic)? {
        Left(state) => {
            let (header, records) = state.advance(take(r)?);
            (header, None, records)
        }
        Right(state) => match state.advance(take(r)?) {
            (header, Left(state)) => {
                let (calibration, records) = state.advance(take(r)?);
                (header, Some(calibration), records)
            }
            (header, Right(records)) => (header, None, records),
        },
    };

    log::debug!(
        "Decoding {:?} document from reader: {} records declared, calibrated: {}.",
        header.version,
        records.remaining(),
        calibration.is_some(),
    );

    while let Some(record) = records.next() {
        records = match record {
            AnyRecord::Motion(s) => decode_record(s, r, o, publish_motion)?,
            AnyRecord::ExtendedMotion(s) => decode_record(s, r, o, publish_motion)?,
            AnyRecord::Position(s) => decode_record(s, r, o, publish_position)?,
        };
    }

    let trailing = io::copy(r, &mut io::sink())?;
    if trailing != 0 {
        log::warn!("{trailing} bytes follow the last declared record and were ignored.");
    }

    Ok((header, calibration))
}

fn decode_record<T: RecordInner<From = [u8; N]>, O: FromSamples, const N: usize>(
    state: Record<T>,
    r: &mut impl Read,
    o: &mut O,
    add: fn(&mut O, Section, T::Into),
) -> Result<Records, Error> {
    let section = state.section();
    let (sample, successor) = state.advance(take(r)?);

    add(o, section, sample);

    Ok(successor)
}

/// Take an exact number of bytes from a reader.
fn take<const N: usize>(r: &mut impl Read) -> Result<[u8; N], Error> {
    let mut buf = [0; N];
    let mut filled = 0;

    while filled < N {
        match r.read(&mut buf[filled..]) {
            Ok(0) => Err(Error::TruncatedData {
                expected: N,
                available: filled,
            })?,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => Err(err)?,
        }
    }

    Ok(buf)
}
