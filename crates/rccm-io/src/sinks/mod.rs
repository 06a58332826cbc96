//! Log, save and map sinks: the three output collaborators the pipeline
//! controller writes through.

mod log_sink;
mod map_sink;
mod save_sink;

pub use log_sink::{FsLogSink, LogSink};
pub use map_sink::{FsMapSink, MapSink, CLASS_PALETTE};
pub use save_sink::{FsSaveSink, SaveSink};

use chrono::NaiveDate;
use rccm_types::{StageId, TileKey};

/// Identifies one persisted tile (all nine cameras): the tile key plus the
/// stage and the two dates spec.md's persisted-state layout encodes in
/// filenames. Per-camera filenames are derived by [`SaveKey::file_name`],
/// which takes the camera explicitly since a single key covers all nine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveKey {
    /// "repair" for a single-orbit run, "sweep" for the orbit aggregator.
    pub mode: &'static str,
    pub tile: TileKey,
    pub stage: StageId,
    pub acquisition_date: NaiveDate,
    pub generation_date: NaiveDate,
}

impl SaveKey {
    /// Filename encoding stage, camera, acquisition date and generation
    /// date, per spec.md §6's persisted state layout.
    pub fn file_name(&self, camera: rccm_types::CameraIndex, extension: &str) -> String {
        format!(
            "{}_{}_{}_{}.{}",
            self.stage.file_tag(),
            camera.name(),
            self.acquisition_date.format("%Y%m%d"),
            self.generation_date.format("%Y%m%d"),
            extension
        )
    }
}
