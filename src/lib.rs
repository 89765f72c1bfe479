//! This file is the root of the `wavebench` crate.
//!
//! wavebench is a test harness for external frequency-domain compressors: it
//! synthesizes 1-D signals of controllable shape, frames them onto a
//! line-oriented text wire, hands them to the compressor executable as a
//! synchronous subprocess, decodes the reconstruction it emits, and scores
//! and plots the result. The compressor itself is an opaque collaborator;
//! this crate never performs the lossy compression, only exercises it.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod error;
pub mod fidelity;
pub mod harness;
pub mod invoke;
pub mod plot;
pub mod signal;
pub mod wire;

//==================================================================================
// 2. Re-exports for the common call path
//==================================================================================
pub use config::HarnessConfig;
pub use error::WavebenchError;
pub use fidelity::FidelityReport;
pub use harness::{run, RunOutcome};
pub use invoke::{Compressor, SubprocessCompressor};
pub use signal::SignalKind;
