// In: src/fidelity.rs

//! This module scores how faithfully the external compressor reconstructed a
//! signal. The two metrics are accumulated in f64 to keep the summation stable
//! over long signals.

use serde::Serialize;

use crate::error::WavebenchError;

/// Aggregate reconstruction-error metrics for one (original, reconstruction)
/// pair. Plain value object; printed and discarded.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FidelityReport {
    /// L1 norm of the difference vector divided by the sample count.
    pub mean_absolute_error: f64,

    /// `sqrt(||difference||_2 / N)`: the square root of the *Euclidean norm*
    /// over N, NOT the textbook RMSE (which would divide the squared sum by N
    /// under the root). The reference harness computes exactly this quantity,
    /// and it is reproduced here unchanged so scores stay comparable.
    pub mean_root_squared_error: f64,
}

/// Computes the fidelity report for a reconstruction.
///
/// # Errors
/// Returns `WavebenchError::LengthMismatch` when the two signals differ in
/// length; the metrics are meaningless in that case and nothing is truncated
/// or padded to force an answer.
pub fn evaluate(original: &[f32], reconstructed: &[f32]) -> Result<FidelityReport, WavebenchError> {
    if original.len() != reconstructed.len() {
        return Err(WavebenchError::LengthMismatch(
            original.len(),
            reconstructed.len(),
        ));
    }
    if original.is_empty() {
        return Ok(FidelityReport {
            mean_absolute_error: 0.0,
            mean_root_squared_error: 0.0,
        });
    }

    let mut abs_sum = 0.0f64;
    let mut sq_sum = 0.0f64;
    for (&a, &b) in original.iter().zip(reconstructed.iter()) {
        let diff = (a as f64) - (b as f64);
        abs_sum += diff.abs();
        sq_sum += diff * diff;
    }

    let n = original.len() as f64;
    Ok(FidelityReport {
        mean_absolute_error: abs_sum / n,
        mean_root_squared_error: (sq_sum.sqrt() / n).sqrt(),
    })
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_signals_score_zero() {
        let s = vec![0.5f32, -1.25, 3.0, 0.0];
        let report = evaluate(&s, &s).unwrap();
        assert_eq!(report.mean_absolute_error, 0.0);
        assert_eq!(report.mean_root_squared_error, 0.0);
    }

    #[test]
    fn test_reference_worked_example() {
        // s = [0,1,0,1], r = [0.1,0.9,-0.1,1.1]:
        //   MAE  = (0.1+0.1+0.1+0.1)/4       = 0.1
        //   MRSE = sqrt(sqrt(4*0.1^2) / 4)   = sqrt(0.05) ~= 0.2236
        let s = vec![0.0f32, 1.0, 0.0, 1.0];
        let r = vec![0.1f32, 0.9, -0.1, 1.1];
        let report = evaluate(&s, &r).unwrap();
        assert!((report.mean_absolute_error - 0.1).abs() < 1e-6);
        assert!((report.mean_root_squared_error - 0.05f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_metric_is_not_textbook_rmse() {
        // For the worked example, textbook RMSE would be sqrt(0.04/4) = 0.1;
        // the harness metric must stay on the reference formula instead.
        let s = vec![0.0f32, 1.0, 0.0, 1.0];
        let r = vec![0.1f32, 0.9, -0.1, 1.1];
        let report = evaluate(&s, &r).unwrap();
        assert!((report.mean_root_squared_error - 0.1).abs() > 0.1);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let result = evaluate(&[1.0, 2.0], &[1.0]);
        match result {
            Err(WavebenchError::LengthMismatch(a, b)) => {
                assert_eq!((a, b), (2, 1));
            }
            other => panic!("expected LengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_signals_score_zero() {
        let report = evaluate(&[], &[]).unwrap();
        assert_eq!(report.mean_absolute_error, 0.0);
        assert_eq!(report.mean_root_squared_error, 0.0);
    }
}
