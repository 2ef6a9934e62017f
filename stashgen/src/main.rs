//! # stashgen
//!
//! Runs one generation round over a JSON type manifest and writes a save/restore companion
//! for every type that declares marked fields. Diagnostics go to stderr and any reported
//! error makes the process exit with status 1.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use error_stack::{Report, ResultExt};
use stashgen::config::GeneratorConfig;
use stashgen::diagnostics::CollectingDiagnostics;
use stashgen::emit::{DirectoryFiler, MemoryFiler, relative_source_path};
use stashgen::error::{Error, Result};
use stashgen::model::ManifestModel;
use stashgen::round::{Processor, RoundReport};
use stashgen::support::tracing::{init_file_tracing, set_tracing_level};

use crate::cli::Args;

mod cli;

fn main() -> ExitCode {
    let args = Args::parse();

    // keep the guard alive so buffered trace lines are flushed on exit
    let _guard = init_file_tracing();
    set_tracing_level(args.log_level);

    match run(&args) {
        Ok(report) if report.has_errors() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("error: {report:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<RoundReport> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    let model = ManifestModel::load(&args.manifest)?;
    let processor = Processor::new(config);
    let mut diagnostics = CollectingDiagnostics::new();

    let round = if args.dry_run {
        let mut filer = MemoryFiler::new();
        let round = processor.process_round(&model, &mut diagnostics, &mut filer);
        if round.is_ok() {
            print_sources(&filer);
        }
        round
    } else {
        processor.process_round(&model, &mut diagnostics, &mut DirectoryFiler::new(&args.out))
    };

    for diagnostic in diagnostics.diagnostics() {
        eprintln!("{diagnostic}");
    }
    let report = round?;

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }
    Ok(report)
}

fn print_sources(filer: &MemoryFiler) {
    for (name, source) in filer.sources() {
        println!("// {}", relative_source_path(name).display());
        println!("{source}");
    }
}

fn write_report(path: &Path, report: &RoundReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .change_context(Error::failed_to("serialize round report", path.display()))?;
    std::fs::write(path, json)
        .map_err(|error| Report::new(Error::io_failed("write report", path, error)))
}
