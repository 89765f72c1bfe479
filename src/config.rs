// In: src/config.rs

//! The single source of truth for harness configuration.
//!
//! A `HarnessConfig` is created once at the application boundary (CLI
//! flags, or a JSON file with flags layered on top) and then passed down
//! read-only. Centralizing the knobs here keeps the core components free of
//! prop drilling.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WavebenchError;
use crate::signal::SignalKind;

/// The unified configuration for one harness run.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct HarnessConfig {
    /// Which waveform family to synthesize.
    #[serde(default)]
    pub signal: SignalKind,

    /// How many frequency components the external compressor may retain.
    /// Must be at least 1.
    #[serde(default = "default_frequency_budget")]
    pub frequency_budget: u32,

    /// Signal length is `2^size_exponent` samples.
    #[serde(default = "default_size_exponent")]
    pub size_exponent: u32,

    /// Path to the external compressor executable.
    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    /// Seed for the signal RNG. `None` means entropy-seeded (fresh waveform
    /// every run).
    #[serde(default)]
    pub seed: Option<u64>,

    /// Deadline for the external compressor, in seconds. `None` reproduces
    /// the original blocking behavior: a hung compressor hangs the harness.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Width of each plot panel, in character cells.
    #[serde(default = "default_plot_width")]
    pub plot_width: usize,

    /// Height of each plot panel, in character rows.
    #[serde(default = "default_plot_height")]
    pub plot_height: usize,
}

impl HarnessConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WavebenchError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Rejects parameter combinations no run can proceed with. Called before
    /// any subprocess is spawned.
    pub fn validate(&self) -> Result<(), WavebenchError> {
        if self.frequency_budget == 0 {
            return Err(WavebenchError::InvalidArgument(
                "frequency budget must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            signal: SignalKind::default(),
            frequency_budget: default_frequency_budget(),
            size_exponent: default_size_exponent(),
            executable: default_executable(),
            seed: None,
            timeout_secs: None,
            plot_width: default_plot_width(),
            plot_height: default_plot_height(),
        }
    }
}

/// The reference compressor's built-in default budget.
fn default_frequency_budget() -> u32 {
    2
}

/// The reference harness always drove 2^10 = 1024 samples.
fn default_size_exponent() -> u32 {
    10
}

fn default_executable() -> PathBuf {
    PathBuf::from("./compressor.exe")
}

fn default_plot_width() -> usize {
    96
}

fn default_plot_height() -> usize {
    10
}
