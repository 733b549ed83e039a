//! Reconstruct one OCR'd paper
//!
//! Reads a document of OCR pages as JSON, runs the layout pipeline and writes
//! body text, footnotes and the processing report as JSON.
//!
//! Usage:
//!   cargo run --release --bin reconstruct_document -- paper.json
//!   cargo run --release --bin reconstruct_document -- paper.json --journal zion --mode scanned
//!   cargo run --release --bin reconstruct_document -- paper.json --config thresholds.json --output out.json
//!
//! Without `--journal` the journal is guessed from the input path.

use folio_oxide::config::{JournalProfile, ScanMode, ThresholdConfig};
use folio_oxide::layout::Document;
use folio_oxide::DocumentPipeline;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

struct RunConfig {
    input: PathBuf,
    journal: Option<JournalProfile>,
    mode: ScanMode,
    config_file: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl RunConfig {
    fn from_args() -> Result<Self, Box<dyn std::error::Error>> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut journal = None;
        let mut mode = ScanMode::default();
        let mut config_file = None;
        let mut output = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--journal" | "-j" => {
                    i += 1;
                    if i < args.len() {
                        journal = Some(args[i].parse()?);
                    }
                },
                "--mode" | "-m" => {
                    i += 1;
                    if i < args.len() {
                        mode = args[i].parse()?;
                    }
                },
                "--config" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        config_file = Some(PathBuf::from(&args[i]));
                    }
                },
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = Some(PathBuf::from(&args[i]));
                    }
                },
                other if !other.starts_with('-') && input.is_none() => {
                    input = Some(PathBuf::from(other));
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        let input = input.ok_or(
            "usage: reconstruct_document <input.json> [--journal NAME] [--mode printed|scanned] \
             [--config thresholds.json] [--output out.json]",
        )?;

        Ok(Self {
            input,
            journal,
            mode,
            config_file,
            output,
        })
    }

    fn thresholds(&self) -> Result<ThresholdConfig, Box<dyn std::error::Error>> {
        if let Some(path) = &self.config_file {
            let json = fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&json)?);
        }
        let journal = self
            .journal
            .unwrap_or_else(|| JournalProfile::from_path_hint(&self.input.to_string_lossy()));
        log::info!("Using {} thresholds ({:?})", journal, self.mode);
        Ok(ThresholdConfig::for_journal(journal, self.mode))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let run = RunConfig::from_args()?;
    let pipeline = DocumentPipeline::with_config(run.thresholds()?);

    let start = Instant::now();
    let document = Document::from_json(&fs::read_to_string(&run.input)?)?;
    let result = pipeline.process_document(&document)?;
    let elapsed = start.elapsed();

    for warning in &result.report.warnings {
        log::warn!("{}", warning);
    }
    log::info!(
        "{}: {} pages, {} footnotes, {} abbreviations in {:.1}ms",
        run.input.display(),
        result.report.pages,
        result.report.footnotes,
        result.report.abbreviations,
        elapsed.as_secs_f64() * 1000.0
    );

    let json = result.to_json()?;
    match &run.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }

    Ok(())
}
