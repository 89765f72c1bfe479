// In: src/error.rs

//! This module defines the single, unified error type for the entire wavebench
//! harness. It uses the `thiserror` crate to provide ergonomic, context-aware
//! error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WavebenchError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to the harness's logic)
    // =========================================================================
    /// The caller asked for something the harness cannot do: an unknown signal
    /// kind, a zero frequency budget, or an exponent too large to allocate.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The wire payload does not conform to the two-record frame shape, or a
    /// token inside it failed numeric parsing.
    #[error("Wire format error: {0}")]
    FormatError(String),

    /// Original and reconstructed signals disagree in length; fidelity metrics
    /// are undefined in that case and the run must abort.
    #[error("Signal length mismatch: expected {0} samples, got {1}")]
    LengthMismatch(usize, usize),

    // =========================================================================
    // === Subprocess Boundary Errors
    // =========================================================================
    /// The external compressor exited non-zero, or could not be spawned at
    /// all (`exit_code` is `None` in the spawn-failure case). The diagnostic
    /// text is the process's stderr, verbatim.
    #[error("External compressor failed (exit code {exit_code:?}): {stderr}")]
    ExternalProcess {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The external compressor did not terminate within the configured
    /// deadline and was killed.
    #[error("External compressor timed out after {0}s")]
    Timeout(u64),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., a broken
    /// pipe while feeding the subprocess).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a
    /// harness configuration file.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
