//! Rhythm extraction using stratum-dsp
//!
//! All tempo estimation and beat tracking happens inside stratum-dsp; this
//! module only adapts its result shape. Input must already be mono at
//! [`TARGET_SAMPLE_RATE`](super::resample::TARGET_SAMPLE_RATE).

use super::resample::TARGET_SAMPLE_RATE;
use crate::error::AnalyzeError;
use stratum_dsp::{analyze_audio, AnalysisConfig};

/// Rhythm characteristics of an audio signal
#[derive(Debug, Clone)]
pub struct RhythmAnalysis {
    /// Estimated tempo in beats per minute
    pub bpm: f32,
    /// Tempo estimate confidence (0.0-1.0)
    pub confidence: f32,
    /// Beat positions in seconds from the start of the signal
    pub beat_timestamps: Vec<f32>,
    /// Time between successive beats, in seconds
    pub bpm_intervals: Vec<f32>,
}

impl RhythmAnalysis {
    /// Number of detected beats
    pub fn beat_count(&self) -> usize {
        self.beat_timestamps.len()
    }

    /// Rhythm regularity score (0.0-1.0)
    ///
    /// `1 - stddev/mean` of the inter-beat intervals, clamped to [0, 1].
    /// A perfectly steady beat scores 1.0; fewer than two intervals scores 0.0.
    pub fn regularity(&self) -> f32 {
        if self.bpm_intervals.len() < 2 {
            return 0.0;
        }

        let n = self.bpm_intervals.len() as f32;
        let mean: f32 = self.bpm_intervals.iter().sum::<f32>() / n;
        if mean <= 0.0 {
            return 0.0;
        }

        let variance: f32 = self
            .bpm_intervals
            .iter()
            .map(|i| (i - mean) * (i - mean))
            .sum::<f32>()
            / n;

        (1.0 - variance.sqrt() / mean).clamp(0.0, 1.0)
    }
}

/// Run rhythm extraction over mono samples at the analysis rate
pub fn extract_rhythm(samples: &[f32]) -> Result<RhythmAnalysis, AnalyzeError> {
    if samples.len() < TARGET_SAMPLE_RATE as usize {
        return Err(AnalyzeError::Analysis(format!(
            "audio too short for rhythm analysis ({} samples)",
            samples.len()
        )));
    }

    let config = AnalysisConfig::default();
    let result = analyze_audio(samples, TARGET_SAMPLE_RATE, config)
        .map_err(|e| AnalyzeError::Analysis(format!("audio analysis failed: {:?}", e)))?;

    if result.bpm <= 0.0 {
        return Err(AnalyzeError::Analysis("could not estimate tempo".to_string()));
    }

    let beat_timestamps = result.beat_grid.beats;
    let bpm_intervals: Vec<f32> = beat_timestamps.windows(2).map(|w| w[1] - w[0]).collect();

    log::info!(
        "Rhythm extracted: BPM={:.1} (confidence: {:.2}), {} beats",
        result.bpm,
        result.bpm_confidence,
        beat_timestamps.len()
    );

    Ok(RhythmAnalysis {
        bpm: result.bpm,
        confidence: result.bpm_confidence,
        beat_timestamps,
        bpm_intervals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_input() {
        let result = extract_rhythm(&[0.0; 1024]);
        assert!(matches!(result, Err(AnalyzeError::Analysis(_))));
    }

    #[test]
    fn test_regularity_of_steady_beat() {
        let analysis = RhythmAnalysis {
            bpm: 120.0,
            confidence: 1.0,
            beat_timestamps: vec![0.0, 0.5, 1.0, 1.5, 2.0],
            bpm_intervals: vec![0.5, 0.5, 0.5, 0.5],
        };
        assert!((analysis.regularity() - 1.0).abs() < 1e-6);
        assert_eq!(analysis.beat_count(), 5);
    }

    #[test]
    fn test_regularity_needs_intervals() {
        let analysis = RhythmAnalysis {
            bpm: 120.0,
            confidence: 1.0,
            beat_timestamps: vec![0.0, 0.5],
            bpm_intervals: vec![0.5],
        };
        assert_eq!(analysis.regularity(), 0.0);
    }

    #[test]
    fn test_regularity_penalizes_jitter() {
        let steady = RhythmAnalysis {
            bpm: 120.0,
            confidence: 1.0,
            beat_timestamps: vec![],
            bpm_intervals: vec![0.5, 0.5, 0.5, 0.5],
        };
        let jittery = RhythmAnalysis {
            bpm: 120.0,
            confidence: 1.0,
            beat_timestamps: vec![],
            bpm_intervals: vec![0.3, 0.7, 0.4, 0.6],
        };
        assert!(jittery.regularity() < steady.regularity());
    }
}
