mod common;

use approx::assert_relative_eq;
use wrcdata::{
    sans::calibration::Quality,
    track::{TrackSummary, haversine_m, route_distance_m, split_seconds},
};

use common::{calibration, motion, position};

#[test]
fn split_times() {
    assert_eq!(split_seconds(4.0), Some(125.0));
    assert_eq!(split_seconds(0.1), None);
    assert_eq!(split_seconds(0.0), None);
}

#[test]
fn haversine_distance() {
    let a = position(0.0, 0.0, 0.0, 0.0);
    let b = position(0.0, 1.0, 0.0, 0.0);

    // One degree of latitude.
    assert_relative_eq!(haversine_m(&a, &b), 111_194.926_644_558_73, max_relative = 1e-9);
    assert_eq!(haversine_m(&a, &a), 0.0);
}

#[test]
fn track_summary() {
    let positions = [
        position(0.0, 0.0, 0.0, 4.0),
        position(1_000.0, 0.0, 0.001, 5.0),
        position(2_000.0, 0.0, 0.002, f32::NAN),
        position(3_000.0, 0.0, 0.003, 3.0),
    ];

    let summary = TrackSummary::new(&positions);

    assert_relative_eq!(summary.distance_m, route_distance_m(&positions));
    assert_relative_eq!(summary.distance_m, 333.584_779_933_676_2, max_relative = 1e-9);
    assert_eq!(summary.duration_s, 3.0);
    assert_eq!(summary.mean_speed, Some(4.0));
    assert_eq!(summary.max_speed, Some(5.0));
    assert_eq!(summary.mean_split_s, Some(125.0));
    assert_eq!(summary.best_split_s, Some(100.0));
}

#[test]
fn empty_track_summary() {
    let summary = TrackSummary::new(&[]);

    assert_eq!(summary, TrackSummary::default());
    assert_eq!(summary.mean_speed, None);
}

#[test]
fn calibration_quality() {
    let mut c = calibration();
    assert_eq!(c.quality(), Quality::Good);

    c.variance = 0.02;
    assert_eq!(c.quality(), Quality::Fair);

    c.variance = 0.05;
    assert_eq!(c.quality(), Quality::Poor);
}

#[test]
fn roll_angle() {
    let mut s = motion(0.0, 0.0);
    s.ax = 0.0;
    assert_eq!(s.roll_deg(), 0.0);

    s.ax = 9.81;
    assert_relative_eq!(s.roll_deg(), 45.0, epsilon = 1e-12);

    s.ax = -9.81;
    assert_relative_eq!(s.roll_deg(), -45.0, epsilon = 1e-12);
}
