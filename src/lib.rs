//! A decoder and stroke analyzer for WRC Coach rowing session logs.
//!
//! A session log holds a versioned header, an optional mounting calibration,
//! and fixed-stride arrays of motion (accelerometer and gyroscope) samples,
//! satellite position samples and raw calibration-capture samples.
//!
//! Most users should begin with [`Session`], which decodes a whole document
//! into owned arrays, then pass its motion samples to a
//! [`stroke::StrokeDetector`] and summarize the result with
//! [`metrics::summarize`]. The [`avec`] module decodes into a custom receiver
//! instead, and the [`sans`] module exposes the underlying finite-state
//! machine.
//!
//! ```
//! let session = wrcdata::Session::open("session.wrcdata")?;
//! let detector = wrcdata::stroke::StrokeDetector::new(Default::default())?;
//! let strokes = detector.detect_motion(&session.motion);
//! let summary = strokes.summarize(detector.config().sample_rate);
//! ```
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `serde`: derive `Serialize` and `Deserialize` for decoded values, detector
//!   configuration and results.

pub mod avec;
pub mod metrics;
pub mod sans;
pub mod session;
pub mod stroke;
pub mod track;

pub use sans::{
    calibration::Calibration,
    header::{DeviceOrientation, Header},
    layout::Version,
    record::{MotionSample, Orientation, PositionSample},
};
pub use session::Session;
