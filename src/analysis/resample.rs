//! Sample rate conversion to the fixed analysis rate
//!
//! The rhythm extraction step is tuned to 44100 Hz, so every input is
//! converted to that rate before analysis. Conversion is done with rubato's
//! polynomial resampler on a single mono channel.

use crate::error::AnalyzeError;
use rubato::{FastFixedIn, PolynomialDegree, Resampler};

/// Fixed sample rate for rhythm analysis.
///
/// The extraction backend's feature windows are tuned to this rate, so it is
/// a policy constant rather than a configuration knob.
pub const TARGET_SAMPLE_RATE: u32 = 44100;

/// Resample a mono buffer to [`TARGET_SAMPLE_RATE`].
///
/// Input already at the target rate is returned as a copy without resampling.
pub fn resample_to_target(input: &[f32], input_rate: u32) -> Result<Vec<f32>, AnalyzeError> {
    if input_rate == 0 {
        return Err(AnalyzeError::Resample("input sample rate is zero".to_string()));
    }

    if input_rate == TARGET_SAMPLE_RATE {
        log::debug!("Sample rate already at {}Hz, skipping resample", TARGET_SAMPLE_RATE);
        return Ok(input.to_vec());
    }

    if input.is_empty() {
        return Err(AnalyzeError::Resample("no samples to resample".to_string()));
    }

    log::debug!("Resampling from {}Hz to {}Hz", input_rate, TARGET_SAMPLE_RATE);

    // The whole buffer is processed as a single chunk; analysis input is
    // bounded by track length, not by a realtime deadline.
    let mut resampler = FastFixedIn::<f32>::new(
        TARGET_SAMPLE_RATE as f64 / input_rate as f64,
        1.0,
        PolynomialDegree::Septic,
        input.len(),
        1,
    )
    .map_err(|e| AnalyzeError::Resample(format!("failed to create resampler: {}", e)))?;

    let mut output = resampler
        .process(&[input], None)
        .map_err(|e| AnalyzeError::Resample(format!("resampling failed: {}", e)))?;

    if output.is_empty() {
        return Err(AnalyzeError::Resample("resampler returned no channels".to_string()));
    }
    let resampled = output.swap_remove(0);

    log::debug!(
        "Resampled {} input samples to {} output samples",
        input.len(),
        resampled.len()
    );

    Ok(resampled)
}
