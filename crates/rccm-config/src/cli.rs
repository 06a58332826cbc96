//! Command-line argument parsing for the RCCM repair pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::Config;

/// RCCM repair pipeline command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "rccm", about = "MISR RCCM repair pipeline")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose console logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and JSON file logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Repair a single path/orbit/block.
    Repair(RepairArgs),
    /// Repair every orbit with complete coverage for a path/block.
    Sweep(SweepArgs),
}

/// Arguments for the `repair` subcommand.
#[derive(Args, Debug)]
pub struct RepairArgs {
    pub path: u16,
    pub orbit: u32,
    pub block: u16,

    /// Enables Stage2's edge-extension rule.
    #[arg(long)]
    pub edge: bool,

    /// Evaluation harness identifier; omit to disable the harness.
    #[arg(long = "test-id")]
    pub test_id: Option<String>,

    /// Per-camera harness first-line, DF..DA order, comma-separated.
    #[arg(long = "first-line", value_delimiter = ',')]
    pub first_line: Option<Vec<i32>>,

    /// Per-camera harness last-line, DF..DA order, comma-separated.
    #[arg(long = "last-line", value_delimiter = ',')]
    pub last_line: Option<Vec<i32>>,

    #[arg(long)]
    pub log: bool,
    #[arg(long)]
    pub save: bool,
    #[arg(long)]
    pub map: bool,

    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,
    #[arg(long = "save-dir")]
    pub save_dir: Option<PathBuf>,
    #[arg(long = "map-dir")]
    pub map_dir: Option<PathBuf>,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    pub path: u16,
    pub block: u16,

    #[arg(long)]
    pub log: bool,
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Apply top-level CLI overrides (verbosity) to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if args.verbose {
            self.runtime.verbose = true;
        }
        if args.debug {
            self.runtime.debug = true;
        }
    }

    /// Apply `repair` subcommand overrides to a loaded config.
    pub fn apply_repair_overrides(&mut self, args: &RepairArgs) {
        if args.edge {
            self.pipeline.edge = true;
        }
        if let Some(ref id) = args.test_id {
            self.pipeline.test_id = id.clone();
        }
        if let Some(ref lines) = args.first_line {
            copy_into_nine(lines, &mut self.pipeline.first_line);
        }
        if let Some(ref lines) = args.last_line {
            copy_into_nine(lines, &mut self.pipeline.last_line);
        }
        if args.log {
            self.output.log = true;
        }
        if args.save {
            self.output.save = true;
        }
        if args.map {
            self.output.map = true;
        }
        if let Some(ref dir) = args.log_dir {
            self.output.log_dir = dir.clone();
        }
        if let Some(ref dir) = args.save_dir {
            self.output.save_dir = dir.clone();
        }
        if let Some(ref dir) = args.map_dir {
            self.output.map_dir = dir.clone();
        }
    }

    /// Apply `sweep` subcommand overrides to a loaded config.
    pub fn apply_sweep_overrides(&mut self, args: &SweepArgs) {
        if args.log {
            self.output.log = true;
        }
        if let Some(ref dir) = args.log_dir {
            self.output.log_dir = dir.clone();
        }
    }
}

/// Copies up to nine values from `src` into `dst`, DF..DA order; a short
/// `src` leaves the remaining cameras at their existing value.
fn copy_into_nine(src: &[i32], dst: &mut [i32; 9]) {
    for (slot, value) in dst.iter_mut().zip(src.iter()) {
        *slot = *value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repair_args() -> RepairArgs {
        RepairArgs {
            path: 37,
            orbit: 12345,
            block: 55,
            edge: false,
            test_id: None,
            first_line: None,
            last_line: None,
            log: false,
            save: false,
            map: false,
            log_dir: None,
            save_dir: None,
            map_dir: None,
        }
    }

    #[test]
    fn test_repair_override() {
        let mut config = Config::default();
        let mut args = repair_args();
        args.edge = true;
        args.test_id = Some("eval1".to_string());
        args.first_line = Some(vec![10, 20, 30]);

        config.apply_repair_overrides(&args);
        assert!(config.pipeline.edge);
        assert_eq!(config.pipeline.test_id, "eval1");
        assert_eq!(config.pipeline.first_line[0], 10);
        assert_eq!(config.pipeline.first_line[1], 20);
        assert_eq!(config.pipeline.first_line[2], 30);
        // untouched cameras retain the default
        assert_eq!(config.pipeline.first_line[3], 0);
    }

    #[test]
    fn test_repair_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = repair_args();

        config.apply_repair_overrides(&args);
        assert_eq!(config, original);
    }

    #[test]
    fn test_sweep_override_sets_log_dir() {
        let mut config = Config::default();
        let args = SweepArgs {
            path: 1,
            block: 2,
            log: true,
            log_dir: Some(PathBuf::from("/tmp/sweep-logs")),
        };

        config.apply_sweep_overrides(&args);
        assert!(config.output.log);
        assert_eq!(config.output.log_dir, PathBuf::from("/tmp/sweep-logs"));
    }

    #[test]
    fn test_verbose_and_debug_overrides() {
        let mut config = Config::default();
        let args = CliArgs {
            config: None,
            verbose: true,
            debug: true,
            command: Command::Repair(repair_args()),
        };

        config.apply_cli_overrides(&args);
        assert!(config.runtime.verbose);
        assert!(config.runtime.debug);
    }
}
