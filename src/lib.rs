//! Rhythm Bridge - C-compatible rhythm analysis library
//!
//! This library extracts tempo (BPM), beat positions and a confidence score
//! from audio files or raw sample buffers, and exposes the results both as a
//! safe Rust API and across a C dynamic-library boundary.
//!
//! Signal processing is delegated entirely to ecosystem libraries: symphonia
//! decodes files, rubato converts everything to the fixed 44100 Hz analysis
//! rate, and stratum-dsp performs tempo estimation and beat tracking.

pub mod analysis;
pub mod engine;
pub mod error;
pub mod ffi;

pub use analysis::{RhythmAnalysis, TARGET_SAMPLE_RATE};
pub use engine::AnalysisEngine;
pub use error::AnalyzeError;
