//! The binary entry point for the RCCM repair pipeline CLI.

use clap::Parser;
use rccm_config::{CliArgs, Command, Config};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|d| d.join("rccm")))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let mut config = match Config::load_or_create(&config_dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load config from {}: {e}", config_dir.display());
            std::process::exit(2);
        }
    };
    config.apply_cli_overrides(&args);

    rccm_log::init_logging(Some(config.output.log_dir.as_path()), config.runtime.debug, Some(&config));

    let result = match &args.command {
        Command::Repair(repair_args) => {
            rccm_cli::run_repair(repair_args.path, repair_args.orbit, repair_args.block, repair_args, &mut config)
        }
        Command::Sweep(sweep_args) => rccm_cli::run_sweep(sweep_args.path, sweep_args.block, sweep_args, &mut config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(rccm_cli::exit_code_for(&e));
    }
}
