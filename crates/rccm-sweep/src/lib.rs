//! Orbit Sweep Aggregator: runs Stage0+Stage1 over every orbit with
//! complete radiance and RCCM coverage for a path/block, tabulating
//! per-camera missing counts.

mod report;

pub use report::{SweepReport, SweepRow};

use std::path::Path;

use chrono::NaiveDate;
use rccm_io::{FileLocator, OrbitCatalog, RadianceReader, RccmCameraReader};
use rccm_pipeline::{stage0, stage1};
use rccm_types::{BlockId, MissingCounts, OrbitId, RccmError};

/// Runs the sweep for one path/block. `date_of_orbit` resolves an orbit
/// number to its acquisition date, an external lookup this crate does not
/// own (spec.md places orbit-to-date translation alongside file discovery,
/// outside the pipeline core).
#[allow(clippy::too_many_arguments)]
pub fn sweep(
    radiance_catalog: &dyn OrbitCatalog,
    rccm_catalog: &dyn OrbitCatalog,
    rccm_locator: &dyn FileLocator,
    radiance_reader: &dyn RadianceReader,
    camera_reader: &dyn RccmCameraReader,
    radiance_root: &Path,
    rccm_root: &Path,
    block: BlockId,
    date_of_orbit: &dyn Fn(OrbitId) -> NaiveDate,
) -> Result<SweepReport, RccmError> {
    let radiance_orbits = radiance_catalog.list_orbits(radiance_root)?;
    let rccm_orbits = rccm_catalog.list_orbits(rccm_root)?;
    let orbits: Vec<OrbitId> = radiance_orbits.intersection(&rccm_orbits).copied().collect();

    if orbits.is_empty() {
        return Err(RccmError::EmptyIntersection);
    }

    let rows = orbits
        .into_iter()
        .map(|orbit| {
            let date = date_of_orbit(orbit);
            match run_stage0_stage1(rccm_locator, radiance_reader, camera_reader, radiance_root, rccm_root, orbit, block) {
                Ok(counts) => SweepRow::ok(orbit, date, counts),
                Err(e) => SweepRow::failed(orbit, date, &e),
            }
        })
        .collect::<Vec<_>>();

    tracing::info!(block, orbit_count = rows.len(), "orbit sweep complete");
    Ok(SweepReport { rows })
}

fn run_stage0_stage1(
    rccm_locator: &dyn FileLocator,
    radiance_reader: &dyn RadianceReader,
    camera_reader: &dyn RccmCameraReader,
    radiance_root: &Path,
    rccm_root: &Path,
    orbit: OrbitId,
    block: BlockId,
) -> Result<MissingCounts, RccmError> {
    let camera_files = rccm_locator.locate(rccm_root, orbit)?;
    let stage0 = stage0::load(camera_reader, &camera_files, block)?;
    let availability = radiance_reader.open_radiance(radiance_root, orbit, block)?;
    let stage1 = stage1::flag(&stage0.tile, &availability);
    Ok(stage1.counts)
}
