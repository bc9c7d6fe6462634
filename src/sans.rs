//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that need fine control over how
//! bytes reach the decoder, such as reading from a memory map or a socket. See
//! [`crate::avec`] for implementations covering the common cases.
//!
//! # Architecture
//!
//! All states are represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance` method
//! with an array of exactly the size that state consumes. This returns a
//! successor state token, along with any decoded value.
//!
//! A document is laid out as:
//!
//! 1. Sixteen zero-padded magic bytes, selecting the format version.
//! 2. The remainder of a version-specific header.
//! 3. A calibration block, for V2 and later documents that declare one.
//! 4. Every motion record, then every position record, then (V2 and later)
//!    every calibration-capture record. Strides are fixed per version.
//!
//! The version is selected once by [`Decoder`] and carried by the successor
//! tokens, so record decoding never re-inspects it. Only the initial state,
//! re-exported for convenience as [`Decoder`], can be constructed.
//!
//! Decoding never inspects bytes beyond those handed to a token. Checking that
//! enough bytes remain, and reporting truncation, is up to the caller.

pub mod calibration;
pub mod header;
pub mod layout;
pub mod record;

/// Entrypoint to the finite-state machine.
pub type Decoder = header::Magic;
