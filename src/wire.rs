// In: src/wire.rs

//! This module contains the pure, stateless kernels for the textual wire frame
//! exchanged with the external compressor.
//!
//! The frame is two newline-separated records, UTF-8 encoded:
//!
//! ```text
//! <count>
//! <v0> <v1> ... <v_{count-1}>
//! ```
//!
//! Record 0 carries the element count as a decimal integer; record 1 carries
//! the samples, space-separated, each rendered with `f32`'s default `Display`
//! (shortest round-trip representation). The same shape is used in both
//! directions: the external reader tokenizes by whitespace, so it accepts the
//! framed request, and the symmetric shape makes `decode(encode(s))` the
//! identity on sample counts and values. Decoding is fully panic-free: every
//! malformed payload maps to a `FormatError`.

use crate::error::WavebenchError;

//==================================================================================
// 1. Encode
//==================================================================================

/// Encodes a signal into its wire frame.
///
/// The count record is derived from the same slice as the value record, so the
/// count invariant holds by construction.
pub fn encode(samples: &[f32]) -> Vec<u8> {
    // ~14 bytes covers the longest shortest-form f32 plus its separator.
    let mut frame = String::with_capacity(16 + samples.len() * 14);
    frame.push_str(&samples.len().to_string());
    frame.push('\n');
    for (i, v) in samples.iter().enumerate() {
        if i > 0 {
            frame.push(' ');
        }
        frame.push_str(&v.to_string());
    }
    frame.push('\n');
    frame.into_bytes()
}

//==================================================================================
// 2. Decode
//==================================================================================

/// Decodes a wire frame back into a signal.
///
/// # Errors
/// Returns `WavebenchError::FormatError` when the payload is not UTF-8, has
/// fewer than two newline-separated records, carries a non-numeric count or
/// value token, or when the declared count disagrees with the number of value
/// tokens actually present.
pub fn decode(payload: &[u8]) -> Result<Vec<f32>, WavebenchError> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| WavebenchError::FormatError(format!("payload is not UTF-8: {}", e)))?;

    let mut records = text.split('\n');
    let count_record = records
        .next()
        .ok_or_else(|| WavebenchError::FormatError("empty payload".to_string()))?;
    let value_record = records.next().ok_or_else(|| {
        WavebenchError::FormatError("missing value record (expected two lines)".to_string())
    })?;

    let declared: usize = count_record.trim().parse().map_err(|_| {
        WavebenchError::FormatError(format!("invalid count record '{}'", count_record.trim()))
    })?;

    let samples = value_record
        .split_whitespace()
        .map(|token| {
            token.parse::<f32>().map_err(|_| {
                WavebenchError::FormatError(format!("invalid sample token '{}'", token))
            })
        })
        .collect::<Result<Vec<f32>, _>>()?;

    // The original harness parsed the count and then ignored it; here a
    // disagreement is treated as corruption.
    if samples.len() != declared {
        return Err(WavebenchError::FormatError(format!(
            "count record declares {} samples but {} are present",
            declared,
            samples.len()
        )));
    }

    Ok(samples)
}
