//! C-linkage boundary
//!
//! Exposes the analysis engine to dynamic-library callers as plain structs,
//! raw pointers and integer status codes (1 = success, 0 = failure). Symbol
//! names keep the `Essentia` prefix expected by existing callers of the
//! wrapper ABI this library replaces.
//!
//! Failure discipline: argument and state checks happen before any work, no
//! panic crosses the boundary, and on any failure the caller's result struct
//! is left untouched.
//!
//! Caller obligations: `ShutdownEssentia` takes the exclusive lock on the
//! engine slot, so it blocks until in-flight analysis calls (which hold the
//! shared lock) have finished. Concurrent analysis calls after a successful
//! `InitializeEssentia` are supported.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::analysis::rhythm::RhythmAnalysis;
use crate::engine::AnalysisEngine;
use std::ffi::{c_char, c_int, CStr};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::ptr;
use std::slice;
use std::sync::RwLock;

/// Rhythm analysis output record, owned by the caller
///
/// `beat_timestamps` and `bpm_intervals` are heap arrays allocated here and
/// released by [`FreeRhythmResult`]. A count of 0 always pairs with a null
/// pointer. Field order and widths are part of the ABI.
#[repr(C)]
pub struct RhythmAnalysisResult {
    pub bpm: f32,
    pub confidence: f32,
    pub beat_timestamps: *mut f32,
    pub beat_count: c_int,
    pub bpm_intervals: *mut f32,
    pub interval_count: c_int,
}

/// Process-wide engine slot: `Some` while initialized
static ENGINE: RwLock<Option<AnalysisEngine>> = RwLock::new(None);

/// Initialize the analysis library
///
/// Idempotent: returns 1 immediately when already initialized. On failure the
/// library stays uninitialized and the call can be retried.
#[no_mangle]
pub extern "C" fn InitializeEssentia() -> c_int {
    let mut slot = match ENGINE.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };

    if slot.is_some() {
        return 1;
    }

    match catch_unwind(AnalysisEngine::new) {
        Ok(engine) => {
            *slot = Some(engine);
            1
        }
        Err(_) => 0,
    }
}

/// Shut the analysis library down
///
/// No-op when not initialized. Waits for in-flight analysis calls to finish
/// before tearing the engine down.
#[no_mangle]
pub extern "C" fn ShutdownEssentia() {
    if let Ok(mut slot) = ENGINE.write() {
        *slot = None;
    }
}

/// Analyze rhythm from an audio file
///
/// Returns 0 when the library is uninitialized, an argument is null, the path
/// is empty or not valid UTF-8, or decoding/analysis fails. `result` is only
/// written on success.
#[no_mangle]
pub extern "C" fn AnalyzeRhythmFromFile(
    audio_file_path: *const c_char,
    result: *mut RhythmAnalysisResult,
) -> c_int {
    if audio_file_path.is_null() || result.is_null() {
        return 0;
    }

    let path = match unsafe { CStr::from_ptr(audio_file_path) }.to_str() {
        Ok(s) if !s.is_empty() => s,
        _ => return 0,
    };

    let slot = match ENGINE.read() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let engine = match slot.as_ref() {
        Some(e) => e,
        None => return 0,
    };

    match catch_unwind(AssertUnwindSafe(|| engine.analyze_file(Path::new(path)))) {
        Ok(Ok(analysis)) => {
            unsafe { write_result(result, analysis) };
            1
        }
        Ok(Err(e)) => {
            log::warn!("Rhythm analysis failed for {}: {}", path, e);
            0
        }
        Err(_) => {
            log::error!("Rhythm analysis panicked for {}", path);
            0
        }
    }
}

/// Analyze rhythm from a raw sample buffer
///
/// `audio_samples` must point to `sample_count` mono f32 samples recorded at
/// `sample_rate` Hz. Returns 0 when the library is uninitialized, a pointer is
/// null, the count or rate is not positive, or resampling/analysis fails.
/// `result` is only written on success.
#[no_mangle]
pub extern "C" fn AnalyzeRhythmFromSamples(
    audio_samples: *const f32,
    sample_count: c_int,
    sample_rate: c_int,
    result: *mut RhythmAnalysisResult,
) -> c_int {
    if audio_samples.is_null() || sample_count <= 0 || sample_rate <= 0 || result.is_null() {
        return 0;
    }

    let samples = unsafe { slice::from_raw_parts(audio_samples, sample_count as usize) };

    let slot = match ENGINE.read() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let engine = match slot.as_ref() {
        Some(e) => e,
        None => return 0,
    };

    match catch_unwind(AssertUnwindSafe(|| {
        engine.analyze_samples(samples, sample_rate as u32)
    })) {
        Ok(Ok(analysis)) => {
            unsafe { write_result(result, analysis) };
            1
        }
        Ok(Err(e)) => {
            log::warn!("Rhythm analysis failed: {}", e);
            0
        }
        Err(_) => {
            log::error!("Rhythm analysis panicked");
            0
        }
    }
}

/// Release the arrays owned by a result
///
/// Safe to call on a never-populated or already-released result; counts are
/// reset to 0 and pointers to null either way.
#[no_mangle]
pub extern "C" fn FreeRhythmResult(result: *mut RhythmAnalysisResult) {
    if result.is_null() {
        return;
    }

    unsafe {
        let res = &mut *result;

        release_array(res.beat_timestamps, res.beat_count);
        res.beat_timestamps = ptr::null_mut();
        res.beat_count = 0;

        release_array(res.bpm_intervals, res.interval_count);
        res.bpm_intervals = ptr::null_mut();
        res.interval_count = 0;
    }
}

unsafe fn write_result(out: *mut RhythmAnalysisResult, analysis: RhythmAnalysis) {
    let (beat_timestamps, beat_count) = export_array(analysis.beat_timestamps);
    let (bpm_intervals, interval_count) = export_array(analysis.bpm_intervals);

    let res = &mut *out;
    res.bpm = analysis.bpm;
    res.confidence = analysis.confidence;
    res.beat_timestamps = beat_timestamps;
    res.beat_count = beat_count;
    res.bpm_intervals = bpm_intervals;
    res.interval_count = interval_count;
}

/// Hand a float sequence to the caller as a raw heap array
fn export_array(values: Vec<f32>) -> (*mut f32, c_int) {
    if values.is_empty() {
        return (ptr::null_mut(), 0);
    }

    let count = values.len() as c_int;
    let boxed = values.into_boxed_slice();
    (Box::into_raw(boxed) as *mut f32, count)
}

/// Reclaim an array previously produced by [`export_array`]
unsafe fn release_array(data: *mut f32, count: c_int) {
    if data.is_null() || count <= 0 {
        return;
    }

    drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
        data,
        count as usize,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_result() -> RhythmAnalysisResult {
        RhythmAnalysisResult {
            bpm: 0.0,
            confidence: 0.0,
            beat_timestamps: ptr::null_mut(),
            beat_count: 0,
            bpm_intervals: ptr::null_mut(),
            interval_count: 0,
        }
    }

    #[test]
    fn test_export_array_empty_is_null() {
        let (data, count) = export_array(Vec::new());
        assert!(data.is_null());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_export_array_roundtrip() {
        let (data, count) = export_array(vec![0.5, 1.0, 1.5]);
        assert_eq!(count, 3);
        let values = unsafe { slice::from_raw_parts(data, count as usize) };
        assert_eq!(values, &[0.5, 1.0, 1.5]);
        unsafe { release_array(data, count) };
    }

    #[test]
    fn test_analyze_rejects_null_arguments() {
        let mut result = blank_result();

        assert_eq!(AnalyzeRhythmFromFile(ptr::null(), &mut result), 0);
        assert_eq!(
            AnalyzeRhythmFromSamples(ptr::null(), 1024, 44100, &mut result),
            0
        );

        let samples = [0.0f32; 1024];
        assert_eq!(
            AnalyzeRhythmFromSamples(samples.as_ptr(), 1024, 44100, ptr::null_mut()),
            0
        );
    }

    #[test]
    fn test_analyze_rejects_non_positive_count_and_rate() {
        let mut result = blank_result();
        let samples = [0.0f32; 1024];

        assert_eq!(
            AnalyzeRhythmFromSamples(samples.as_ptr(), 0, 44100, &mut result),
            0
        );
        assert_eq!(
            AnalyzeRhythmFromSamples(samples.as_ptr(), -1, 44100, &mut result),
            0
        );
        assert_eq!(
            AnalyzeRhythmFromSamples(samples.as_ptr(), 1024, 0, &mut result),
            0
        );
    }

    #[test]
    fn test_free_tolerates_null_and_blank_results() {
        FreeRhythmResult(ptr::null_mut());

        let mut result = blank_result();
        FreeRhythmResult(&mut result);
        FreeRhythmResult(&mut result);
        assert!(result.beat_timestamps.is_null());
        assert_eq!(result.beat_count, 0);
    }
}
