//! Stroke detection from the fore-aft acceleration channel.
//!
//! The channel is band-pass filtered to the stroke cadence range, then catches
//! are taken as peaks of the filtered signal and finishes as peaks of its
//! negation. Every constant involved is an empirical default held in
//! [`DetectorConfig`].

pub mod filter;
pub mod peaks;

pub use peaks::find_peaks;

use thiserror::Error;

use crate::{
    metrics::{self, StrokeSummary},
    sans::record::MotionSample,
};

use self::filter::BandPass;

/// How the band-pass filter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMode {
    /// A single causal pass. Peaks lag the raw signal by the filter's group
    /// delay.
    Forward,
    /// A forward and a backward pass. Peaks align with the raw signal.
    #[default]
    ZeroPhase,
}

/// Parameters for stroke detection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Motion sample rate, in Hz.
    pub sample_rate: f64,
    /// Lower band edge, in Hz (18 strokes per minute).
    pub low_cut_hz: f64,
    /// Upper band edge, in Hz (72 strokes per minute).
    pub high_cut_hz: f64,
    /// Minimum filtered value of a catch peak.
    pub catch_height: f64,
    /// Minimum negated filtered value of a finish trough.
    pub finish_height: f64,
    /// Minimum time between two catches, or two finishes, in seconds.
    pub min_separation_s: f64,
    pub mode: FilterMode,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 50.0,
            low_cut_hz: 0.3,
            high_cut_hz: 1.2,
            catch_height: 0.3,
            finish_height: 0.1,
            min_separation_s: 0.8,
            mode: FilterMode::ZeroPhase,
        }
    }
}

/// An error validating a detector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sample rate is not a positive, finite number.
    #[error("Invalid sample rate ({0} Hz).")]
    SampleRate(f64),
    /// The band edges are not ordered below the Nyquist frequency.
    #[error("Invalid pass band ({low} Hz to {high} Hz at {sample_rate} Hz).")]
    Band { low: f64, high: f64, sample_rate: f64 },
    /// The minimum separation is not a positive, finite number.
    #[error("Invalid minimum separation ({0} s).")]
    Separation(f64),
}

/// Detected stroke events.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strokes {
    /// Indices of catches, strictly increasing.
    pub catches: Vec<usize>,
    /// Indices of finishes, strictly increasing.
    pub finishes: Vec<usize>,
    /// The filtered signal the events were taken from.
    pub filtered: Vec<f64>,
}

/// A stroke detector for one configuration.
#[derive(Debug, Clone)]
pub struct StrokeDetector {
    config: DetectorConfig,
    filter: BandPass,
    distance: usize,
}

impl StrokeDetector {
    /// Create a detector, validating its configuration.
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        let DetectorConfig {
            sample_rate,
            low_cut_hz,
            high_cut_hz,
            min_separation_s,
            ..
        } = config;

        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            Err(ConfigError::SampleRate(sample_rate))?;
        }

        if !(0.0 < low_cut_hz && low_cut_hz < high_cut_hz && high_cut_hz < sample_rate / 2.0) {
            Err(ConfigError::Band {
                low: low_cut_hz,
                high: high_cut_hz,
                sample_rate,
            })?;
        }

        if !(min_separation_s.is_finite() && min_separation_s > 0.0) {
            Err(ConfigError::Separation(min_separation_s))?;
        }

        Ok(Self {
            filter: BandPass::new(low_cut_hz, high_cut_hz, sample_rate),
            distance: (min_separation_s * sample_rate).ceil() as usize,
            config,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect catches and finishes in a fore-aft acceleration series.
    ///
    /// Fewer than two samples yield no events.
    pub fn detect(&self, fore_aft: &[f32]) -> Strokes {
        if fore_aft.len() < 2 {
            return Strokes::default();
        }

        let x: Vec<f64> = fore_aft.iter().map(|v| *v as f64).collect();

        let filtered = match self.config.mode {
            FilterMode::Forward => self.filter.forward(&x),
            FilterMode::ZeroPhase => self.filter.zero_phase(&x),
        };

        let catches = find_peaks(&filtered, self.config.catch_height, self.distance);

        let negated: Vec<f64> = filtered.iter().map(|v| -v).collect();
        let finishes = find_peaks(&negated, self.config.finish_height, self.distance);

        log::debug!(
            "Detected {} catches and {} finishes over {} samples.",
            catches.len(),
            finishes.len(),
            filtered.len(),
        );

        Strokes {
            catches,
            finishes,
            filtered,
        }
    }

    /// Detect catches and finishes in the fore-aft (`ay`) channel of motion
    /// samples.
    pub fn detect_motion(&self, motion: &[MotionSample]) -> Strokes {
        let fore_aft: Vec<f32> = motion.iter().map(|s| s.ay).collect();
        self.detect(&fore_aft)
    }
}

impl Strokes {
    /// Summarize stroke rate and drive ratio at a sample rate.
    pub fn summarize(&self, sample_rate: f64) -> StrokeSummary {
        metrics::summarize(&self.catches, &self.finishes, sample_rate)
    }
}
