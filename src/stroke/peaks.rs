//! Local-maxima extraction.

use std::cmp::Ordering;

/// Find peaks in a signal.
///
/// A peak is a sample (or the midpoint of a flat run of samples) strictly
/// greater than its neighbours on both sides, with a value of at least
/// `height`. Peaks closer than `distance` samples to a taller peak are
/// discarded, tallest first; equal heights favour the earlier peak.
///
/// Returns peak indices in increasing order. Endpoints are never peaks.
pub fn find_peaks(x: &[f64], height: f64, distance: usize) -> Vec<usize> {
    let peaks: Vec<usize> = local_maxima(x)
        .into_iter()
        .filter(|p| x[*p] >= height)
        .collect();

    select_by_distance(x, &peaks, distance.max(1))
}

fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();

    let Some(end) = x.len().checked_sub(1) else {
        return peaks;
    };

    let mut i = 1;
    while i < end {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < end && x[ahead] == x[i] {
                ahead += 1;
            }

            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    peaks
}

fn select_by_distance(x: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    let mut keep = vec![true; peaks.len()];

    let mut priority: Vec<usize> = (0..peaks.len()).collect();
    priority.sort_by(|a, b| {
        x[peaks[*b]]
            .partial_cmp(&x[peaks[*a]])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(b))
    });

    for j in priority {
        if !keep[j] {
            continue;
        }

        for k in (0..j).rev() {
            if peaks[j] - peaks[k] >= distance {
                break;
            }
            keep[k] = false;
        }

        for k in j + 1..peaks.len() {
            if peaks[k] - peaks[j] >= distance {
                break;
            }
            keep[k] = false;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(p, keep)| keep.then_some(*p))
        .collect()
}
