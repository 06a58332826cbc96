//! Configuration system for the RCCM repair pipeline.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command, RepairArgs, SweepArgs};
pub use config::{Config, OutputSettings, PipelineSettings, RuntimeSettings};
pub use error::ConfigError;
