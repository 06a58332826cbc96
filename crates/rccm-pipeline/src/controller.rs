//! Orchestrates Stage0 through Stage3, the evaluation harness, and
//! persistence through the sinks in `rccm-io`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rccm_io::{FsLogSink, FsMapSink, FsSaveSink, LogSink, MapSink, RadianceReader, RccmCameraReader, SaveKey, SaveSink};
use rccm_types::{
    AnomalyLog, BlockId, ClassCode, CloudMaskTile, ConfusionMatrix, MissingCounts, OrbitId,
    RccmError, StageId, TileKey, ALL_CAMERAS, LINES, SAMPLES,
};

use crate::stage0;
use crate::stage1;
use crate::stage2::{self, Stage2Options};
use crate::stage3::{self, Stage3Options};

/// Recognized controller options (spec.md §4.5).
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    /// Enables Stage2's edge-extension rule.
    pub edge: bool,
    /// Empty disables the evaluation harness.
    pub test_id: String,
    /// Per-camera harness blanking range, `<= 0` skips that camera.
    pub first_line: [i32; 9],
    pub last_line: [i32; 9],
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            edge: false,
            test_id: String::new(),
            first_line: [0; 9],
            last_line: [0; 9],
        }
    }
}

impl PipelineOptions {
    fn harness_active(&self) -> bool {
        !self.test_id.is_empty()
    }
}

/// Stage-boundary observer, invoked once per stage with its output counts.
/// Default is a no-op (spec.md §9: "progress reporting ... lifted to an
/// observer capability ... default is a no-op observer").
pub trait PipelineObserver {
    fn on_stage_complete(&mut self, stage: StageId, counts: &MissingCounts);
}

/// The default no-op observer.
pub struct NullObserver;

impl PipelineObserver for NullObserver {
    fn on_stage_complete(&mut self, _stage: StageId, _counts: &MissingCounts) {}
}

/// Result of a full (possibly short-circuited) pipeline run.
pub struct PipelineOutput {
    pub tile: CloudMaskTile,
    pub final_counts: MissingCounts,
    pub last_stage: StageId,
    pub anomalies: AnomalyLog,
    /// Present only when the evaluation harness was active.
    pub confusion: Option<ConfusionMatrix>,
    /// Residual gap count if Stage3 ran and did not fully converge. Never
    /// returned as an `Err`; surfaced here so callers can log/report it.
    pub residual: Option<u32>,
}

/// Runs Stage0 through Stage3 (short-circuiting when an earlier stage
/// already reaches zero gaps), per spec.md §4.5's control flow.
#[allow(clippy::too_many_arguments)]
pub fn run(
    camera_reader: &dyn RccmCameraReader,
    radiance_reader: &dyn RadianceReader,
    camera_files: &[PathBuf; 9],
    radiance_path: &Path,
    orbit: OrbitId,
    block: BlockId,
    options: &PipelineOptions,
    observer: &mut dyn PipelineObserver,
) -> Result<PipelineOutput, RccmError> {
    let stage0 = stage0::load(camera_reader, camera_files, block)?;
    observer.on_stage_complete(StageId::Stage0, &stage0.counts);

    let harness_active = options.harness_active();
    let checkpoint = harness_active.then(|| stage0.tile.clone());

    let mut pre_stage1 = stage0.tile;
    if harness_active {
        blank_harness_region(&mut pre_stage1, options);
    }

    let availability = radiance_reader.open_radiance(radiance_path, orbit, block)?;
    let stage1 = stage1::flag(&pre_stage1, &availability);
    observer.on_stage_complete(StageId::Stage1, &stage1.counts);

    if stage1.counts.is_zero() {
        return Ok(PipelineOutput {
            tile: stage1.tile,
            final_counts: stage1.counts,
            last_stage: StageId::Stage1,
            anomalies: stage0.anomalies,
            confusion: None,
            residual: None,
        });
    }

    let stage2 = stage2::fill(&stage1.tile, &stage1.counts, Stage2Options { edge: options.edge });
    observer.on_stage_complete(StageId::Stage2, &stage2.counts);

    let mut confusion = harness_active
        .then(|| compute_confusion(checkpoint.as_ref().unwrap(), &stage2.tile, options));

    if stage2.counts.is_zero() {
        return Ok(PipelineOutput {
            tile: stage2.tile,
            final_counts: stage2.counts,
            last_stage: StageId::Stage2,
            anomalies: stage0.anomalies,
            confusion,
            residual: None,
        });
    }

    let stage3 = stage3::fill(&stage2.tile, Stage3Options::default());
    observer.on_stage_complete(StageId::Stage3, &stage3.counts);

    if harness_active {
        confusion = Some(compute_confusion(checkpoint.as_ref().unwrap(), &stage3.tile, options));
    }

    let residual = (!stage3.converged).then(|| stage3.counts.total());

    Ok(PipelineOutput {
        tile: stage3.tile,
        final_counts: stage3.counts,
        last_stage: StageId::Stage3,
        anomalies: stage0.anomalies,
        confusion,
        residual,
    })
}

/// Overwrites each camera's configured line range with gaps, checkpointing
/// having already happened before this call.
fn blank_harness_region(tile: &mut CloudMaskTile, options: &PipelineOptions) {
    for camera in ALL_CAMERAS {
        if let Some((lo, hi)) = harness_range(options, camera) {
            for sample in 0..SAMPLES {
                for line in lo..=hi {
                    tile.set(camera, sample, line, ClassCode::Missing);
                }
            }
        }
    }
}

/// Computes a confusion matrix restricted to the artificially blanked
/// region, recording only pixels reconstructed to a valid observation
/// (property 9: the matrix totals the *reconstructed-valid* pixel count).
fn compute_confusion(
    checkpoint: &CloudMaskTile,
    current: &CloudMaskTile,
    options: &PipelineOptions,
) -> ConfusionMatrix {
    let mut cm = ConfusionMatrix::new();
    for camera in ALL_CAMERAS {
        let Some((lo, hi)) = harness_range(options, camera) else {
            continue;
        };
        for sample in 0..SAMPLES {
            for line in lo..=hi {
                let original = checkpoint.get(camera, sample, line);
                let reconstructed = current.get(camera, sample, line);
                if reconstructed.is_valid_observation() {
                    cm.record(camera, original, reconstructed);
                }
            }
        }
    }
    cm
}

/// Resolves one camera's configured harness line range, inclusive, clipped
/// to the block; `None` if the camera is skipped (either bound `<= 0`).
fn harness_range(options: &PipelineOptions, camera: rccm_types::CameraIndex) -> Option<(usize, usize)> {
    let fl = options.first_line[camera.index()];
    let ll = options.last_line[camera.index()];
    if fl <= 0 || ll <= 0 || fl > ll {
        return None;
    }
    let lo = (fl as usize).min(LINES - 1);
    let hi = (ll as usize).min(LINES - 1);
    Some((lo, hi))
}

/// Which optional outputs to persist after a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputOptions {
    pub log: bool,
    pub save: bool,
    pub map: bool,
}

/// Persists a pipeline result through the configured sinks, all rooted at
/// the same directory and keyed by `tile_key`/`mode`.
#[allow(clippy::too_many_arguments)]
pub fn persist(
    output: &PipelineOutput,
    tile_key: &TileKey,
    mode: &'static str,
    acquisition_date: NaiveDate,
    generation_date: NaiveDate,
    outputs: &OutputOptions,
    log_root: &Path,
    save_root: &Path,
    map_root: &Path,
) -> Result<(), RccmError> {
    if outputs.log {
        let mut sink = FsLogSink::new(log_root);
        sink.write_stage(
            tile_key,
            output.last_stage,
            &output.tile,
            &output.final_counts,
            output.confusion.as_ref(),
        )?;
    }

    let save_key = SaveKey {
        mode,
        tile: tile_key.clone(),
        stage: output.last_stage,
        acquisition_date,
        generation_date,
    };

    if outputs.save {
        FsSaveSink::new(save_root).save_tile(&save_key, &output.tile)?;
    }
    if outputs.map {
        FsMapSink::new(map_root).render_tile(&save_key, &output.tile)?;
    }
    Ok(())
}
