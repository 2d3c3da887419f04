//! Audio analysis layer
//!
//! Decoding, resampling and rhythm extraction plumbing. No signal processing
//! is implemented here: decoding is symphonia, rate conversion is rubato, and
//! tempo/beat extraction is stratum-dsp. This layer adapts inputs and outputs
//! between them.

pub mod decode;
pub mod resample;
pub mod rhythm;

pub use resample::TARGET_SAMPLE_RATE;
pub use rhythm::RhythmAnalysis;
