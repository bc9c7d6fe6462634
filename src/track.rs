//! Distance, speed and split summaries over position samples.

use crate::sans::record::PositionSample;

/// Mean Earth radius, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Below this speed, in m/s, a split is not meaningful.
pub const MIN_SPLIT_SPEED: f64 = 0.1;

/// Seconds per 500 m at a speed in m/s.
pub fn split_seconds(speed: f64) -> Option<f64> {
    (speed > MIN_SPLIT_SPEED).then(|| 500.0 / speed)
}

/// Great-circle distance between two positions, in meters.
pub fn haversine_m(a: &PositionSample, b: &PositionSample) -> f64 {
    let (phi1, phi2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Summed distance between consecutive positions, in meters.
pub fn route_distance_m(positions: &[PositionSample]) -> f64 {
    positions.windows(2).map(|w| haversine_m(&w[0], &w[1])).sum()
}

/// Summary of a position track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSummary {
    pub distance_m: f64,
    /// Seconds between the first and last position.
    pub duration_s: f64,
    /// Over finite speeds only; absent when there are none.
    pub mean_speed: Option<f64>,
    pub max_speed: Option<f64>,
    /// Split at the mean speed.
    pub mean_split_s: Option<f64>,
    /// Split at the maximum speed.
    pub best_split_s: Option<f64>,
}

impl TrackSummary {
    pub fn new(positions: &[PositionSample]) -> Self {
        let duration_s = match (positions.first(), positions.last()) {
            (Some(first), Some(last)) => (last.timestamp - first.timestamp) / 1000.0,
            _ => 0.0,
        };

        let speeds: Vec<f64> = positions
            .iter()
            .map(|p| p.speed as f64)
            .filter(|s| s.is_finite())
            .collect();

        let mean_speed =
            (!speeds.is_empty()).then(|| speeds.iter().sum::<f64>() / speeds.len() as f64);
        let max_speed = speeds.iter().copied().reduce(f64::max);

        Self {
            distance_m: route_distance_m(positions),
            duration_s,
            mean_speed,
            max_speed,
            mean_split_s: mean_speed.and_then(split_seconds),
            best_split_s: max_speed.and_then(split_seconds),
        }
    }
}
