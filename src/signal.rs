// In: src/signal.rs

//! This module contains the pure, stateless kernels for synthesizing the 1-D
//! test signals fed to the external compressor.
//!
//! All generators produce `Vec<f32>` of length `2^n` for a caller-chosen
//! exponent `n`. Randomness is never ambient: the caller injects a seedable
//! `StdRng`, which keeps `Periodic` generation reproducible in tests while
//! remaining entropy-seeded in normal operation.

use std::f32::consts::TAU;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::WavebenchError;

/// Largest supported size exponent. `2^30` f32 samples is already 4 GiB;
/// anything above is a caller mistake, not a workload.
pub const MAX_SIZE_EXPONENT: u32 = 30;

/// Standard deviation of the Gaussian noise floor under every periodic signal.
const NOISE_STD: f32 = 0.1;

/// Period, in samples, of the deterministic square wave.
const PULSE_PERIOD: usize = 100;

//==================================================================================
// 1. Signal Kinds
//==================================================================================

/// The family of waveform a generator run produces.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// A randomized sum of 1..=9 sinusoidal components over a Gaussian noise
    /// floor. Component periods, amplitudes and phases are drawn fresh per run.
    #[default]
    Periodic,

    /// A deterministic period-100 square wave (50% duty cycle). Consumes no
    /// entropy.
    Pulse,

    /// A periodic sum with the fixed component set (period, amplitude) =
    /// (2, 2), (3, 5), (20, 10) and random phases only. Useful for demos where
    /// the envelope must look the same from run to run.
    FixedPeriodic,
}

impl FromStr for SignalKind {
    type Err = WavebenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "periodic" | "1" => Ok(SignalKind::Periodic),
            "pulse" | "step" | "2" => Ok(SignalKind::Pulse),
            "fixed" | "fixed_periodic" | "fixed-periodic" => Ok(SignalKind::FixedPeriodic),
            other => Err(WavebenchError::InvalidArgument(format!(
                "unknown signal kind '{}' (expected 'periodic', 'pulse' or 'fixed_periodic')",
                other
            ))),
        }
    }
}

//==================================================================================
// 2. Public Generation API
//==================================================================================

/// Synthesizes a signal of `kind` with exactly `1 << size_exponent` samples.
///
/// # Errors
/// Returns `WavebenchError::InvalidArgument` if `size_exponent` exceeds
/// [`MAX_SIZE_EXPONENT`].
pub fn generate(
    kind: SignalKind,
    size_exponent: u32,
    rng: &mut StdRng,
) -> Result<Vec<f32>, WavebenchError> {
    if size_exponent > MAX_SIZE_EXPONENT {
        return Err(WavebenchError::InvalidArgument(format!(
            "size exponent {} exceeds the maximum of {}",
            size_exponent, MAX_SIZE_EXPONENT
        )));
    }
    let len = 1usize << size_exponent;

    let signal = match kind {
        SignalKind::Periodic => {
            let components = draw_random_components(rng);
            periodic_sum(len, &components, rng)
        }
        SignalKind::FixedPeriodic => {
            let components = fixed_components(rng);
            periodic_sum(len, &components, rng)
        }
        SignalKind::Pulse => pulse_wave(len),
    };
    debug_assert_eq!(signal.len(), len);
    Ok(signal)
}

//==================================================================================
// 3. Waveform Kernels
//==================================================================================

/// One sinusoidal component of a periodic sum: integer period in samples,
/// integer amplitude, phase offset in radians.
struct Component {
    period: u32,
    amplitude: f32,
    phase: f32,
}

/// Draws the randomized component set: a uniform count in `[1, 9]`, that many
/// distinct periods from `1..=20`, amplitudes (with replacement) from `1..=10`
/// and an independent phase in `[0, 2π)` per component.
fn draw_random_components(rng: &mut StdRng) -> Vec<Component> {
    let count = rng.gen_range(1..=9usize);

    let mut periods: Vec<u32> = (1..=20).collect();
    periods.shuffle(rng);
    periods.truncate(count);

    periods
        .into_iter()
        .map(|period| Component {
            period,
            amplitude: rng.gen_range(1..=10u32) as f32,
            phase: TAU * rng.gen::<f32>(),
        })
        .collect()
}

/// The fixed demo component set; only the phases are random.
fn fixed_components(rng: &mut StdRng) -> Vec<Component> {
    [(2u32, 2.0f32), (3, 5.0), (20, 10.0)]
        .iter()
        .map(|&(period, amplitude)| Component {
            period,
            amplitude,
            phase: TAU * rng.gen::<f32>(),
        })
        .collect()
}

/// Lays down the Gaussian noise floor, then accumulates every component's
/// `A * sin(r + (i mod p) * 2π / p)` term per sample. All arithmetic stays in
/// f32 to match the wire precision.
fn periodic_sum(len: usize, components: &[Component], rng: &mut StdRng) -> Vec<f32> {
    let mut data: Vec<f32> = (0..len)
        .map(|_| NOISE_STD * rng.sample::<f32, _>(StandardNormal))
        .collect();

    for (i, sample) in data.iter_mut().enumerate() {
        for c in components {
            let angle = c.phase + (i as u32 % c.period) as f32 * TAU / c.period as f32;
            *sample += c.amplitude * angle.sin();
        }
    }
    data
}

/// Deterministic square wave: `1.0` on the back half of each 100-sample
/// period, `0.0` on the front half.
fn pulse_wave(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            if i % PULSE_PERIOD >= PULSE_PERIOD / 2 {
                1.0
            } else {
                0.0
            }
        })
        .collect()
}
