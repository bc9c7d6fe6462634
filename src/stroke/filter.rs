//! Second-order Butterworth sections and the band-pass cascade built from
//! them.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// A biquad section in transposed direct form II.
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    b: [f64; 3],
    a: [f64; 2],
    state: [f64; 2],
}

impl Biquad {
    /// A second-order Butterworth low-pass section.
    pub fn low_pass(cutoff_hz: f64, sample_rate: f64) -> Self {
        let (cos, alpha) = prewarp(cutoff_hz, sample_rate);
        let b = (1.0 - cos) / 2.0;

        Self::normalized([b, 1.0 - cos, b], [1.0 + alpha, -2.0 * cos, 1.0 - alpha])
    }

    /// A second-order Butterworth high-pass section.
    pub fn high_pass(cutoff_hz: f64, sample_rate: f64) -> Self {
        let (cos, alpha) = prewarp(cutoff_hz, sample_rate);
        let b = (1.0 + cos) / 2.0;

        Self::normalized([b, -(1.0 + cos), b], [1.0 + alpha, -2.0 * cos, 1.0 - alpha])
    }

    fn normalized(b: [f64; 3], a: [f64; 3]) -> Self {
        Self {
            b: b.map(|b| b / a[0]),
            a: [a[1] / a[0], a[2] / a[0]],
            state: [0.0; 2],
        }
    }

    /// Gain for a constant input.
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / (1.0 + self.a[0] + self.a[1])
    }

    /// Set the state to the steady state for a constant input `x`.
    ///
    /// Returns the steady-state output.
    pub fn settle(&mut self, x: f64) -> f64 {
        let g = self.dc_gain();
        self.state = [(g - self.b[0]) * x, (self.b[2] - self.a[1] * g) * x];
        g * x
    }

    /// Filter a single sample.
    pub fn process(&mut self, x: f64) -> f64 {
        let y = self.b[0] * x + self.state[0];
        self.state[0] = self.b[1] * x - self.a[0] * y + self.state[1];
        self.state[1] = self.b[2] * x - self.a[1] * y;
        y
    }
}

fn prewarp(cutoff_hz: f64, sample_rate: f64) -> (f64, f64) {
    let w0 = 2.0 * PI * cutoff_hz / sample_rate;
    (w0.cos(), w0.sin() / (2.0 * FRAC_1_SQRT_2))
}

/// A fourth-order band-pass: a high-pass section at the lower edge followed
/// by a low-pass section at the upper edge.
#[derive(Debug, Clone, Copy)]
pub struct BandPass {
    sections: [Biquad; 2],
}

impl BandPass {
    /// A band-pass between two cutoffs, in Hz.
    pub fn new(low_cut_hz: f64, high_cut_hz: f64, sample_rate: f64) -> Self {
        Self {
            sections: [
                Biquad::high_pass(low_cut_hz, sample_rate),
                Biquad::low_pass(high_cut_hz, sample_rate),
            ],
        }
    }

    /// Filter a signal once, front to back.
    ///
    /// The sections start settled on the first sample, so a constant offset
    /// produces no start-up transient.
    pub fn forward(&self, x: &[f64]) -> Vec<f64> {
        let mut sections = self.sections;

        if let Some(first) = x.first() {
            sections.iter_mut().fold(*first, |u, s| s.settle(u));
        }

        x.iter()
            .map(|x| sections.iter_mut().fold(*x, |u, s| s.process(u)))
            .collect()
    }

    /// Filter a signal forward and then backward, cancelling the phase delay.
    ///
    /// The signal is extended at both ends by odd reflection before filtering.
    pub fn zero_phase(&self, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        let (Some(first), Some(last)) = (x.first(), x.last()) else {
            return Vec::new();
        };

        let pad = (3 * (2 * self.sections.len() + 1)).min(n - 1);

        let mut extended = Vec::with_capacity(n + 2 * pad);
        extended.extend(x[1..=pad].iter().rev().map(|v| 2.0 * first - v));
        extended.extend_from_slice(x);
        extended.extend(x[n - 1 - pad..n - 1].iter().rev().map(|v| 2.0 * last - v));

        let mut y = self.forward(&extended);
        y.reverse();
        let mut y = self.forward(&y);
        y.reverse();

        y.drain(..pad);
        y.truncate(n);
        y
    }
}
