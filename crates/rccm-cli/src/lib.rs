//! CLI plumbing for the RCCM repair pipeline: subcommand handlers wiring
//! `rccm-config`, `rccm-log`, `rccm-io`'s filesystem backends, and the
//! `rccm-pipeline`/`rccm-sweep` crates together.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use rccm_config::{Config, RepairArgs, SweepArgs};
use rccm_io::{FileLocator, FsCameraReader, FsFileLocator, FsOrbitCatalog, FsRadianceReader};
use rccm_pipeline::{NullObserver, OutputOptions};
use rccm_types::{OrbitId, RccmError, TileKey};

/// Default radiance/RCCM roots when not overridden, mirroring the layout
/// spec.md §6 describes for persisted state.
pub const DEFAULT_RADIANCE_ROOT: &str = "./radiance";
pub const DEFAULT_RCCM_ROOT: &str = "./rccm";

/// MISR's sun-synchronous orbit completes roughly every 99 minutes, about
/// 14.55 orbits per day; this workspace has no ephemeris service, so orbit
/// numbers are mapped onto a calendar date at a fixed ~15-orbits-per-day
/// cadence from the Terra launch epoch. Good enough to label files; never
/// used for anything the pipeline's correctness depends on.
const EPOCH: (i32, u32, u32) = (2000, 2, 24);
const ORBITS_PER_DAY: i64 = 15;

pub fn orbit_to_date(orbit: OrbitId) -> NaiveDate {
    let epoch = NaiveDate::from_ymd_opt(EPOCH.0, EPOCH.1, EPOCH.2).expect("valid epoch date");
    epoch + chrono::Duration::days(orbit as i64 / ORBITS_PER_DAY)
}

/// Runs a single path/orbit/block repair and persists through the
/// configured sinks.
pub fn run_repair(path: u16, orbit: OrbitId, block: u16, args: &RepairArgs, config: &mut Config) -> anyhow::Result<()> {
    config.apply_repair_overrides(args);

    let locator = FsFileLocator::new();
    let camera_reader = FsCameraReader::new();
    let radiance_reader = FsRadianceReader::new();

    let radiance_root = Path::new(DEFAULT_RADIANCE_ROOT);
    let rccm_root = Path::new(DEFAULT_RCCM_ROOT);

    let camera_files = locator.locate(rccm_root, orbit).context("locating camera files")?;

    let pipeline_options = config.pipeline.to_pipeline_options();
    let output = rccm_pipeline::run(
        &camera_reader,
        &radiance_reader,
        &camera_files,
        radiance_root,
        orbit,
        block,
        &pipeline_options,
        &mut NullObserver,
    )
    .context("running pipeline")?;

    if let Some(residual) = output.residual {
        tracing::warn!(residual, "stage3 did not fully converge");
    }

    let tile_key = TileKey {
        path,
        orbit,
        block,
        test_id: pipeline_options.test_id.clone(),
        edge: pipeline_options.edge,
    };

    let output_options = OutputOptions {
        log: config.output.log,
        save: config.output.save,
        map: config.output.map,
    };

    rccm_pipeline::persist(
        &output,
        &tile_key,
        "repair",
        orbit_to_date(orbit),
        Local::now().date_naive(),
        &output_options,
        &config.output.log_dir,
        &config.output.save_dir,
        &config.output.map_dir,
    )
    .context("persisting pipeline output")?;

    Ok(())
}

/// Runs the orbit sweep for a path/block and prints the tabulated report.
pub fn run_sweep(path: u16, block: u16, args: &SweepArgs, config: &mut Config) -> anyhow::Result<()> {
    config.apply_sweep_overrides(args);

    let radiance_root = Path::new(DEFAULT_RADIANCE_ROOT);
    let rccm_root = Path::new(DEFAULT_RCCM_ROOT);

    let radiance_catalog = FsOrbitCatalog::new();
    let rccm_catalog = FsOrbitCatalog::new();
    let locator = FsFileLocator::new();
    let radiance_reader = FsRadianceReader::new();
    let camera_reader = FsCameraReader::new();

    // `path` only labels the sweep's log filename; the sweep itself iterates
    // every orbit with radiance/RCCM coverage under the given roots, keyed
    // only by block.
    let report = rccm_sweep::sweep(
        &radiance_catalog,
        &rccm_catalog,
        &locator,
        &radiance_reader,
        &camera_reader,
        radiance_root,
        rccm_root,
        block,
        &orbit_to_date,
    )
    .context("running orbit sweep")?;

    print!("{}", report.to_table());

    if config.output.log {
        std::fs::create_dir_all(&config.output.log_dir)
            .context("creating sweep log directory")?;
        let log_path: PathBuf = config.output.log_dir.join(format!("sweep_{path}_{block}.tsv"));
        std::fs::write(&log_path, report.to_table())
            .with_context(|| format!("writing {}", log_path.display()))?;
    }

    Ok(())
}

/// Maps an `anyhow`-wrapped `RccmError` to the CLI's exit code, falling
/// back to a generic failure code for errors that did not originate at an
/// `RccmError` boundary (argument parsing, filesystem setup).
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RccmError>() {
        Some(e) => e.exit_code(),
        None => 1,
    }
}
