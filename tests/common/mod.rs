#![allow(dead_code)]

use std::f64::consts::PI;

use wrcdata::{Calibration, MotionSample, Orientation, PositionSample};

/// A document to encode, with every header field spelled out.
#[derive(Debug, Clone)]
pub struct Document {
    pub magic: &'static [u8],
    pub session_start: f64,
    pub device_orientation: u8,
    pub demo_mode: u8,
    pub catch_threshold: f32,
    pub finish_threshold: f32,
    pub calibration: Option<Calibration>,
    pub motion: Vec<MotionSample>,
    pub positions: Vec<PositionSample>,
    pub captures: Vec<MotionSample>,
}

impl Document {
    pub fn new(magic: &'static [u8]) -> Self {
        Self {
            magic,
            session_start: 1_697_200_000_000.0,
            device_orientation: 0,
            demo_mode: 1,
            catch_threshold: 0.6,
            finish_threshold: -0.3,
            calibration: None,
            motion: Vec::new(),
            positions: Vec::new(),
            captures: Vec::new(),
        }
    }

    fn is_v1(&self) -> bool {
        self.magic.starts_with(b"WRC_COACH_V1")
    }

    fn is_extended(&self) -> bool {
        self.magic.starts_with(b"WRC_COACH_V3")
    }

    /// Encode with the layout selected by the magic bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut w = Vec::new();

        let mut magic = [0u8; 16];
        let n = self.magic.len().min(16);
        magic[..n].copy_from_slice(&self.magic[..n]);
        w.extend_from_slice(&magic);

        w.extend_from_slice(&(self.motion.len() as u32).to_le_bytes());
        w.extend_from_slice(&(self.positions.len() as u32).to_le_bytes());

        if !self.is_v1() {
            w.extend_from_slice(&(self.captures.len() as u32).to_le_bytes());
            w.push(self.calibration.is_some() as u8);
        }

        w.extend_from_slice(&self.session_start.to_le_bytes());
        w.push(self.device_orientation);
        w.push(self.demo_mode);
        w.extend_from_slice(&self.catch_threshold.to_le_bytes());
        w.extend_from_slice(&self.finish_threshold.to_le_bytes());

        w.resize(if self.is_v1() { 64 } else { 128 }, 0);

        if let Some(c) = &self.calibration {
            let start = w.len();
            for v in [
                c.pitch_offset,
                c.roll_offset,
                c.yaw_offset,
                c.lateral_offset,
                c.gravity_magnitude,
            ] {
                w.extend_from_slice(&v.to_le_bytes());
            }
            w.extend_from_slice(&c.samples.to_le_bytes());
            w.extend_from_slice(&c.variance.to_le_bytes());
            w.extend_from_slice(&c.timestamp.to_le_bytes());
            w.resize(start + 64, 0);
        }

        for s in &self.motion {
            self.encode_motion(&mut w, s);
        }

        for p in &self.positions {
            w.extend_from_slice(&p.timestamp.to_le_bytes());
            w.extend_from_slice(&p.latitude.to_le_bytes());
            w.extend_from_slice(&p.longitude.to_le_bytes());
            w.extend_from_slice(&p.speed.to_le_bytes());
            w.extend_from_slice(&p.heading.to_le_bytes());
            w.extend_from_slice(&p.accuracy.to_le_bytes());
        }

        if !self.is_v1() {
            for s in &self.captures {
                self.encode_motion(&mut w, s);
            }
        }

        w
    }

    fn encode_motion(&self, w: &mut Vec<u8>, s: &MotionSample) {
        w.extend_from_slice(&s.timestamp.to_le_bytes());
        for v in [s.ax, s.ay, s.az, s.gx, s.gy, s.gz] {
            w.extend_from_slice(&v.to_le_bytes());
        }

        if self.is_extended() {
            let o = s.orientation.unwrap_or(Orientation {
                alpha: f32::NAN,
                beta: f32::NAN,
                gamma: f32::NAN,
            });
            for v in [o.alpha, o.beta, o.gamma] {
                w.extend_from_slice(&v.to_le_bytes());
            }
        }
    }
}

pub fn motion(timestamp: f64, ay: f32) -> MotionSample {
    MotionSample {
        timestamp,
        ax: 0.25,
        ay,
        az: 9.81,
        gx: 1.5,
        gy: -2.0,
        gz: 0.125,
        orientation: None,
    }
}

pub fn position(timestamp: f64, latitude: f64, longitude: f64, speed: f32) -> PositionSample {
    PositionSample {
        timestamp,
        latitude,
        longitude,
        speed,
        heading: 90.0,
        accuracy: 5.0,
    }
}

pub fn calibration() -> Calibration {
    Calibration {
        pitch_offset: 12.5,
        roll_offset: -3.25,
        yaw_offset: 0.0,
        lateral_offset: 0.15,
        gravity_magnitude: 9.806,
        samples: 250,
        variance: 0.004,
        timestamp: 1_697_199_990_000.0,
    }
}

/// A fore-aft stroke signal: a sinusoid at `spm` strokes per minute with a
/// constant offset, sampled at `rate` Hz for `seconds`.
pub fn rowing_signal(spm: f64, rate: f64, seconds: f64, offset: f64) -> Vec<f32> {
    let n = (rate * seconds) as usize;
    let f = spm / 60.0;

    (0..n)
        .map(|i| (offset + 2.0 * (2.0 * PI * f * i as f64 / rate).sin()) as f32)
        .collect()
}

/// Motion samples carrying a fore-aft signal, 20 ms apart.
pub fn rowing_motion(signal: &[f32]) -> Vec<MotionSample> {
    signal
        .iter()
        .enumerate()
        .map(|(i, ay)| motion(1_697_200_000_000.0 + 20.0 * i as f64, *ay))
        .collect()
}
