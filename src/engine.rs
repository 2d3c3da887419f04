//! Analysis engine
//!
//! [`AnalysisEngine`] is the explicit state holder for the library lifecycle:
//! an engine value exists exactly while the library is initialized, and every
//! analysis entry point is a method on it. The C boundary keeps one engine in
//! a process-wide slot; Rust callers can construct their own.

use crate::analysis::decode::decode_to_mono;
use crate::analysis::resample::resample_to_target;
use crate::analysis::rhythm::{extract_rhythm, RhythmAnalysis};
use crate::error::AnalyzeError;
use std::path::Path;

/// Rhythm analysis engine with a fixed 44100 Hz analysis policy
///
/// Each analysis call builds its own working state inside the extraction
/// backend, so a single engine can serve concurrent calls.
pub struct AnalysisEngine;

impl AnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Analyze rhythm from an audio file
    ///
    /// Decodes the file to mono, converts it to the analysis rate and runs
    /// rhythm extraction.
    pub fn analyze_file(&self, path: &Path) -> Result<RhythmAnalysis, AnalyzeError> {
        log::debug!("Analyzing audio file: {:?}", path);

        let (samples, sample_rate) = decode_to_mono(path)?;
        let samples = resample_to_target(&samples, sample_rate)?;
        extract_rhythm(&samples)
    }

    /// Analyze rhythm from a raw mono sample buffer
    ///
    /// Input at any positive sample rate is accepted; anything other than
    /// [`TARGET_SAMPLE_RATE`](crate::analysis::resample::TARGET_SAMPLE_RATE)
    /// is resampled before extraction.
    pub fn analyze_samples(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<RhythmAnalysis, AnalyzeError> {
        if samples.is_empty() {
            return Err(AnalyzeError::InvalidArgument("empty sample buffer".to_string()));
        }
        if sample_rate == 0 {
            return Err(AnalyzeError::InvalidArgument(
                "sample rate must be positive".to_string(),
            ));
        }

        log::debug!(
            "Analyzing {} samples ({:.1}s) at {}Hz",
            samples.len(),
            samples.len() as f32 / sample_rate as f32,
            sample_rate
        );

        let samples = resample_to_target(samples, sample_rate)?;
        extract_rhythm(&samples)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::resample::TARGET_SAMPLE_RATE;

    #[test]
    fn test_analyze_file_requires_file() {
        let engine = AnalysisEngine::new();
        let result = engine.analyze_file(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(AnalyzeError::Decode(_))));
    }

    #[test]
    fn test_analyze_samples_rejects_empty_buffer() {
        let engine = AnalysisEngine::new();
        let result = engine.analyze_samples(&[], TARGET_SAMPLE_RATE);
        assert!(matches!(result, Err(AnalyzeError::InvalidArgument(_))));
    }

    #[test]
    fn test_analyze_samples_rejects_zero_rate() {
        let engine = AnalysisEngine::new();
        let result = engine.analyze_samples(&[0.0; 1024], 0);
        assert!(matches!(result, Err(AnalyzeError::InvalidArgument(_))));
    }
}
