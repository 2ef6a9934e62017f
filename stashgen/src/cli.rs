use std::path::PathBuf;

use clap::Parser;
use stashgen::support::tracing::TracingLevel;

/// Generate save/restore companions for marked fields
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON manifest describing the program's types and marked fields.
    #[arg(long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// Root directory for generated sources, one file per artifact below its package path.
    #[arg(long, value_name = "DIR", default_value = "generated")]
    pub out: PathBuf,

    /// Generator configuration (JSON). Defaults target the Android `Bundle` API.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Render into memory and print the sources instead of writing files.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Write a JSON summary of the round to this file.
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Level written to the trace log in the temp directory.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: TracingLevel,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["stashgen", "--manifest", "types.json"]);
        assert_eq!(args.out, PathBuf::from("generated"));
        assert_eq!(args.log_level, TracingLevel::Warn);
        assert!(!args.dry_run);
        assert!(args.config.is_none());
    }
}
