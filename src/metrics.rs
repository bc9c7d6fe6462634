//! Stroke rate and drive ratio statistics.

/// Mean and population standard deviation of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub mean: f64,
    pub std: f64,
}

impl Stats {
    /// Compute statistics over a non-empty series.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std: var.sqrt(),
        })
    }
}

/// Per-stroke and aggregate stroke metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrokeMetrics {
    /// Strokes per minute for each pair of consecutive catches.
    pub stroke_rates: Vec<f64>,
    pub stroke_rate: Stats,
    /// Drive phase as a percentage of the stroke, for each well-ordered
    /// catch, finish, next catch triple.
    pub drive_ratios: Vec<f64>,
    /// Absent when no triple is well ordered.
    pub drive_ratio: Option<Stats>,
    /// Number of catches.
    pub stroke_count: usize,
}

/// The outcome of summarizing a detection run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrokeSummary {
    /// Too few catches (or an unusable sample rate) to measure a stroke.
    InsufficientData { catches: usize },
    Computed(StrokeMetrics),
}

impl StrokeSummary {
    pub fn metrics(&self) -> Option<&StrokeMetrics> {
        match self {
            Self::Computed(metrics) => Some(metrics),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Reduce ordered catch and finish indices to stroke metrics.
///
/// The drive ratio of stroke `i` is measured only when
/// `catches[i] < finishes[i] < catches[i + 1]`; other pairs are skipped.
pub fn summarize(catches: &[usize], finishes: &[usize], sample_rate: f64) -> StrokeSummary {
    let insufficient = StrokeSummary::InsufficientData {
        catches: catches.len(),
    };

    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return insufficient;
    }

    let stroke_rates: Vec<f64> = catches
        .windows(2)
        .filter(|w| w[1] > w[0])
        .map(|w| 60.0 * sample_rate / (w[1] - w[0]) as f64)
        .collect();

    let Some(stroke_rate) = Stats::of(&stroke_rates) else {
        return insufficient;
    };

    let drive_ratios: Vec<f64> = catches
        .windows(2)
        .zip(finishes)
        .filter(|(w, finish)| w[0] < **finish && **finish < w[1])
        .map(|(w, finish)| 100.0 * (finish - w[0]) as f64 / (w[1] - w[0]) as f64)
        .collect();

    StrokeSummary::Computed(StrokeMetrics {
        drive_ratio: Stats::of(&drive_ratios),
        stroke_rate,
        stroke_rates,
        drive_ratios,
        stroke_count: catches.len(),
    })
}
