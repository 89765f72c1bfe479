// In: src/harness.rs

//! The composition root: one run of the harness, end to end.
//!
//! Data flow is strictly linear and synchronous:
//!
//!   generate -> encode -> external compressor -> decode -> evaluate
//!
//! Each run owns its own signal, payloads and report; nothing is shared or
//! persisted across runs. The only suspension point is the blocking wait
//! inside the injected [`Compressor`].

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::HarnessConfig;
use crate::error::WavebenchError;
use crate::fidelity::{self, FidelityReport};
use crate::invoke::Compressor;
use crate::signal;
use crate::wire;

/// Everything one run produced: both signals (for the operator to plot) and
/// the fidelity report.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub original: Vec<f32>,
    pub reconstructed: Vec<f32>,
    pub report: FidelityReport,
}

/// Drives one complete harness run against the given compressor.
pub fn run(config: &HarnessConfig, compressor: &dyn Compressor) -> Result<RunOutcome, WavebenchError> {
    // 1. Reject bad parameters before anything is spawned.
    config.validate()?;

    // 2. Build the signal RNG: seeded for reproducibility, entropy otherwise.
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // 3. Synthesize the original signal.
    let original = signal::generate(config.signal, config.size_exponent, &mut rng)?;
    info!(
        "generated {:?} signal with {} samples",
        config.signal,
        original.len()
    );

    // 4. Frame it for the wire.
    let request = wire::encode(&original);
    debug!("encoded request frame: {} bytes", request.len());

    // 5. One synchronous exchange with the external compressor.
    let response = compressor.compress(config.frequency_budget, &request)?;

    // 6. Decode the reconstruction.
    let reconstructed = wire::decode(&response)?;
    debug!("decoded reconstruction: {} samples", reconstructed.len());

    // 7. Score it.
    let report = fidelity::evaluate(&original, &reconstructed)?;
    info!(
        "fidelity: mae={:.6} mrse={:.6}",
        report.mean_absolute_error, report.mean_root_squared_error
    );

    Ok(RunOutcome {
        original,
        reconstructed,
        report,
    })
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalKind;

    /// In-memory compressor fake: decodes the request, re-encodes it verbatim.
    /// A perfect "compressor" with zero reconstruction error.
    struct PerfectFake;

    impl Compressor for PerfectFake {
        fn compress(&self, _budget: u32, request: &[u8]) -> Result<Vec<u8>, WavebenchError> {
            let samples = wire::decode(request)?;
            Ok(wire::encode(&samples))
        }
    }

    /// Fake that perturbs every sample by a fixed offset.
    struct OffsetFake(f32);

    impl Compressor for OffsetFake {
        fn compress(&self, _budget: u32, request: &[u8]) -> Result<Vec<u8>, WavebenchError> {
            let samples: Vec<f32> = wire::decode(request)?.iter().map(|v| v + self.0).collect();
            Ok(wire::encode(&samples))
        }
    }

    /// Fake that emits a frame with the wrong sample count.
    struct TruncatingFake;

    impl Compressor for TruncatingFake {
        fn compress(&self, _budget: u32, request: &[u8]) -> Result<Vec<u8>, WavebenchError> {
            let mut samples = wire::decode(request)?;
            samples.truncate(samples.len() / 2);
            Ok(wire::encode(&samples))
        }
    }

    fn seeded_config(kind: SignalKind) -> HarnessConfig {
        HarnessConfig {
            signal: kind,
            seed: Some(42),
            size_exponent: 8,
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn test_perfect_reconstruction_scores_zero() {
        let outcome = run(&seeded_config(SignalKind::Periodic), &PerfectFake).unwrap();
        assert_eq!(outcome.original.len(), 256);
        assert_eq!(outcome.original, outcome.reconstructed);
        assert_eq!(outcome.report.mean_absolute_error, 0.0);
        assert_eq!(outcome.report.mean_root_squared_error, 0.0);
    }

    #[test]
    fn test_constant_offset_shows_up_as_mae() {
        let outcome = run(&seeded_config(SignalKind::Pulse), &OffsetFake(0.25)).unwrap();
        assert!((outcome.report.mean_absolute_error - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_zero_budget_aborts_before_the_compressor_runs() {
        struct MustNotRun;
        impl Compressor for MustNotRun {
            fn compress(&self, _b: u32, _r: &[u8]) -> Result<Vec<u8>, WavebenchError> {
                panic!("compressor must not be invoked for an invalid budget");
            }
        }
        let config = HarnessConfig {
            frequency_budget: 0,
            ..seeded_config(SignalKind::Pulse)
        };
        assert!(matches!(
            run(&config, &MustNotRun),
            Err(WavebenchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_shortened_reconstruction_is_a_length_mismatch() {
        let result = run(&seeded_config(SignalKind::Pulse), &TruncatingFake);
        assert!(matches!(result, Err(WavebenchError::LengthMismatch(_, _))));
    }

    #[test]
    fn test_same_seed_same_signal() {
        let a = run(&seeded_config(SignalKind::Periodic), &PerfectFake).unwrap();
        let b = run(&seeded_config(SignalKind::Periodic), &PerfectFake).unwrap();
        assert_eq!(a.original, b.original);
    }
}
