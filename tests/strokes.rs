mod common;

use approx::assert_abs_diff_eq;
use wrcdata::{
    Session,
    metrics::StrokeSummary,
    stroke::{ConfigError, DetectorConfig, FilterMode, StrokeDetector, find_peaks},
};

use common::{Document, rowing_motion, rowing_signal};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detector() -> StrokeDetector {
    StrokeDetector::new(DetectorConfig::default()).unwrap()
}

#[test]
fn detect_steady_rate() {
    init();

    // 25 strokes per minute: one stroke every 120 samples at 50 Hz.
    let signal = rowing_signal(25.0, 50.0, 30.0, 0.5);
    let strokes = detector().detect(&signal);

    assert!((12..=14).contains(&strokes.catches.len()), "{:?}", strokes.catches);
    assert!((11..=13).contains(&strokes.finishes.len()), "{:?}", strokes.finishes);
    assert_eq!(strokes.filtered.len(), signal.len());

    assert!(strokes.catches.windows(2).all(|w| w[0] < w[1]));
    assert!(strokes.finishes.windows(2).all(|w| w[0] < w[1]));

    // Away from the edges, catches sit on the raw signal's crests.
    let interior = &strokes.catches[1..strokes.catches.len() - 1];
    for catch in interior {
        let phase = (*catch as i64 - 30).rem_euclid(120);
        assert!(phase <= 3 || phase >= 117, "catch at {catch}");
    }

    let summary = strokes.summarize(50.0);
    let metrics = summary.metrics().unwrap();

    assert_abs_diff_eq!(metrics.stroke_rate.mean, 25.0, epsilon = 0.5);
    assert!(metrics.stroke_rate.std < 1.0);
    assert_eq!(metrics.stroke_count, strokes.catches.len());

    // Finishes sit half a stroke after each catch.
    let interior = &strokes.finishes[1..strokes.finishes.len() - 1];
    for finish in interior {
        let phase = (*finish as i64 - 90).rem_euclid(120);
        assert!(phase <= 3 || phase >= 117, "finish at {finish}");
    }

    assert!(strokes.catches[0] < strokes.finishes[0]);
    assert!(strokes.finishes[0] < strokes.catches[1]);

    let drive = metrics.drive_ratio.unwrap();
    assert_abs_diff_eq!(drive.mean, 50.0, epsilon = 5.0);
}

#[test]
fn detect_forward_mode() {
    let config = DetectorConfig {
        mode: FilterMode::Forward,
        ..Default::default()
    };
    let detector = StrokeDetector::new(config).unwrap();

    let signal = rowing_signal(30.0, 50.0, 30.0, 0.0);
    let strokes = detector.detect(&signal);

    assert!((14..=16).contains(&strokes.catches.len()), "{:?}", strokes.catches);

    let metrics = strokes.summarize(50.0);
    assert_abs_diff_eq!(metrics.metrics().unwrap().stroke_rate.mean, 30.0, epsilon = 0.5);
}

#[test]
fn detect_is_deterministic() {
    let signal = rowing_signal(28.0, 50.0, 20.0, 0.2);
    let detector = detector();

    assert_eq!(detector.detect(&signal), detector.detect(&signal));
}

#[test]
fn detect_motion_reads_fore_aft() {
    let signal = rowing_signal(25.0, 50.0, 20.0, 0.0);

    let mut doc = Document::new(b"WRC_COACH_V2");
    doc.motion = rowing_motion(&signal);

    let session = Session::from_slice(&doc.encode()).unwrap();
    let detector = detector();

    assert_eq!(session.fore_aft(), signal);
    assert_eq!(detector.detect_motion(&session.motion), detector.detect(&signal));

    let rate = session.sample_rate().unwrap();
    assert_abs_diff_eq!(rate, 50.0, epsilon = 0.1);
}

#[test]
fn detect_degenerate_input() {
    let detector = detector();

    for signal in [&[][..], &[1.0]] {
        let strokes = detector.detect(signal);
        assert!(strokes.catches.is_empty());
        assert!(strokes.finishes.is_empty());
        assert!(matches!(
            strokes.summarize(50.0),
            StrokeSummary::InsufficientData { catches: 0 }
        ));
    }

    let flat = vec![9.81; 500];
    let strokes = detector.detect(&flat);
    assert!(strokes.catches.is_empty());
    assert!(strokes.finishes.is_empty());
}

#[test]
fn reject_invalid_config() {
    let invalid = [
        DetectorConfig {
            sample_rate: 0.0,
            ..Default::default()
        },
        DetectorConfig {
            sample_rate: f64::NAN,
            ..Default::default()
        },
    ];
    for config in invalid {
        assert!(matches!(
            StrokeDetector::new(config),
            Err(ConfigError::SampleRate(_))
        ));
    }

    let invalid = [
        DetectorConfig {
            high_cut_hz: 30.0,
            ..Default::default()
        },
        DetectorConfig {
            low_cut_hz: 1.5,
            ..Default::default()
        },
    ];
    for config in invalid {
        assert!(matches!(
            StrokeDetector::new(config),
            Err(ConfigError::Band { .. })
        ));
    }

    let config = DetectorConfig {
        min_separation_s: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        StrokeDetector::new(config),
        Err(ConfigError::Separation(_))
    ));
}

#[test]
fn find_peaks_by_height_and_distance() {
    let x = [0.0, 1.0, 0.0, 0.5, 0.0, 2.0, 0.0, 0.2, 0.0];

    assert_eq!(find_peaks(&x, 0.0, 1), vec![1, 3, 5, 7]);
    assert_eq!(find_peaks(&x, 0.3, 1), vec![1, 3, 5]);
    // The taller peak at 5 suppresses its neighbours first.
    assert_eq!(find_peaks(&x, 0.3, 3), vec![1, 5]);
    assert_eq!(find_peaks(&x, 0.0, 5), vec![5]);
}

#[test]
fn find_peaks_plateaus_and_edges() {
    // Plateaus report their midpoint; endpoints are never peaks.
    let x = [3.0, 1.0, 2.0, 2.0, 2.0, 1.0, 2.0, 2.0, 5.0];
    assert_eq!(find_peaks(&x, 0.0, 1), vec![3]);

    // Equal heights keep the earlier peak.
    let x = [0.0, 1.0, 0.0, 1.0, 0.0];
    assert_eq!(find_peaks(&x, 0.0, 3), vec![1]);

    assert!(find_peaks(&[], 0.0, 1).is_empty());
    assert!(find_peaks(&[1.0, 2.0], 0.0, 1).is_empty());
}
