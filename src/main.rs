use anyhow::{Context, Result};
use clap::Parser;
use rhythm_bridge::{AnalysisEngine, TARGET_SAMPLE_RATE};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rhythm-bridge")]
#[command(about = "Extract tempo and beat positions from an audio file", long_about = None)]
struct Args {
    /// Audio file to analyze
    #[arg(required_unless_present = "test")]
    file: Option<PathBuf>,

    /// Run an analysis backend self-check instead of analyzing a file
    #[arg(long)]
    test: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// JSON report for a successfully analyzed file
#[derive(Serialize)]
struct RhythmReport {
    tempo_bpm: f32,
    confidence: f32,
    beat_timestamps_sec: Vec<f32>,
    bpm_intervals: Vec<f32>,
    beats_detected: usize,
    rhythm_regularity: f32,
}

#[derive(Serialize)]
struct StatusReport {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorReport {
    error: String,
}

fn main() {
    let args = Args::parse();

    // Initialize logging (stderr, so stdout stays machine-readable)
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(&args) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            let report = ErrorReport {
                error: format!("{:#}", e),
            };
            let json = serde_json::to_string(&report)
                .unwrap_or_else(|_| r#"{"error":"failed to serialize error report"}"#.to_string());
            println!("{}", json);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String> {
    if args.test {
        return self_check();
    }

    let path = args.file.as_ref().context("no input file given")?;

    let engine = AnalysisEngine::new();
    let analysis = engine
        .analyze_file(path)
        .with_context(|| format!("failed to analyze {:?}", path))?;

    let report = RhythmReport {
        tempo_bpm: analysis.bpm,
        confidence: analysis.confidence,
        beats_detected: analysis.beat_count(),
        rhythm_regularity: analysis.regularity(),
        beat_timestamps_sec: analysis.beat_timestamps,
        bpm_intervals: analysis.bpm_intervals,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    Ok(json)
}

/// Run the full analysis pipeline over a synthetic click track
fn self_check() -> Result<String> {
    log::info!("Running analysis backend self-check...");

    let samples = synthetic_click_track(120.0, TARGET_SAMPLE_RATE, 5.0);
    let engine = AnalysisEngine::new();
    engine
        .analyze_samples(&samples, TARGET_SAMPLE_RATE)
        .context("analysis backend self-check failed")?;

    let report = StatusReport {
        status: "ok",
        message: "analysis backend available",
    };
    Ok(serde_json::to_string(&report)?)
}

/// Generate a click track: short decaying 1 kHz bursts on every beat
fn synthetic_click_track(bpm: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
    let total = (sample_rate as f32 * seconds) as usize;
    let mut samples = vec![0.0f32; total];

    let beat_period = 60.0 / bpm;
    let click_len = (sample_rate as f32 * 0.01) as usize;

    let mut t = 0.0f32;
    while t < seconds {
        let start = (t * sample_rate as f32) as usize;
        for i in 0..click_len {
            let idx = start + i;
            if idx >= total {
                break;
            }
            let decay = 1.0 - i as f32 / click_len as f32;
            let phase = 2.0 * std::f32::consts::PI * 1000.0 * (i as f32 / sample_rate as f32);
            samples[idx] = 0.9 * decay * phase.sin();
        }
        t += beat_period;
    }

    samples
}
