//! Text log sink: per-stage category counts, per-camera percentages, and
//! confusion matrices, appended as UTF-8.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use rccm_types::{
    ClassCode, CloudMaskTile, ConfusionMatrix, MissingCounts, RccmError, StageId, TileKey,
    ALL_CAMERAS,
};

/// Appends formatted per-stage diagnostics as UTF-8 text.
pub trait LogSink {
    fn write_stage(
        &mut self,
        tile_key: &TileKey,
        stage: StageId,
        tile: &CloudMaskTile,
        counts: &MissingCounts,
        confusion: Option<&ConfusionMatrix>,
    ) -> Result<(), RccmError>;
}

/// Appends one text file per tile under `root/{tile.directory_name()}/log.txt`.
pub struct FsLogSink {
    root: PathBuf,
}

impl FsLogSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn format_stage(
        tile: &CloudMaskTile,
        stage: StageId,
        counts: &MissingCounts,
        confusion: Option<&ConfusionMatrix>,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {stage} ===\n"));
        out.push_str(&format!("total missing: {}\n", counts.total()));
        for camera in ALL_CAMERAS {
            let plane = tile.camera_plane(camera);
            let total = plane.len() as f64;
            let mut per_class = [0u32; 8];
            for cell in plane {
                match cell {
                    ClassCode::Missing => per_class[0] += 1,
                    ClassCode::CloudHigh => per_class[1] += 1,
                    ClassCode::CloudLow => per_class[2] += 1,
                    ClassCode::ClearLow => per_class[3] += 1,
                    ClassCode::ClearHigh => per_class[4] += 1,
                    ClassCode::Obscured => per_class[5] += 1,
                    ClassCode::Edge => per_class[6] += 1,
                    ClassCode::Fill | ClassCode::Other(_) => per_class[7] += 1,
                }
            }
            out.push_str(&format!(
                "  {}: missing={} ({:.2}%) cloud_hi={:.2}% cloud_lo={:.2}% clear_lo={:.2}% clear_hi={:.2}% obscured={:.2}% edge={:.2}% other={:.2}%\n",
                camera.name(),
                counts.camera(camera),
                100.0 * per_class[0] as f64 / total,
                100.0 * per_class[1] as f64 / total,
                100.0 * per_class[2] as f64 / total,
                100.0 * per_class[3] as f64 / total,
                100.0 * per_class[4] as f64 / total,
                100.0 * per_class[5] as f64 / total,
                100.0 * per_class[6] as f64 / total,
                100.0 * per_class[7] as f64 / total,
            ));
        }
        if let Some(cm) = confusion {
            out.push_str("  confusion matrix (row=original, col=reconstructed):\n");
            for camera in ALL_CAMERAS {
                if cm.total(camera) == 0 {
                    continue;
                }
                out.push_str(&format!(
                    "    {}: total={} reconstructed_valid={}\n",
                    camera.name(),
                    cm.total(camera),
                    cm.total_reconstructed_valid(camera)
                ));
            }
        }
        out
    }
}

impl LogSink for FsLogSink {
    fn write_stage(
        &mut self,
        tile_key: &TileKey,
        stage: StageId,
        tile: &CloudMaskTile,
        counts: &MissingCounts,
        confusion: Option<&ConfusionMatrix>,
    ) -> Result<(), RccmError> {
        let dir = self.root.join(tile_key.directory_name());
        std::fs::create_dir_all(&dir)
            .map_err(|e| RccmError::SinkFailure(format!("creating {}: {e}", dir.display())))?;
        let path = dir.join("log.txt");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| RccmError::SinkFailure(format!("opening {}: {e}", path.display())))?;
        let text = Self::format_stage(tile, stage, counts, confusion);
        file.write_all(text.as_bytes())
            .map_err(|e| RccmError::SinkFailure(format!("writing {}: {e}", path.display())))?;
        tracing::info!(stage = %stage, total_missing = counts.total(), "wrote stage log");
        Ok(())
    }
}
