//! Binary persistence of a tile as an opaque blob.

use std::io::Write;
use std::path::PathBuf;

use rccm_types::{CloudMaskTile, RccmError, ALL_CAMERAS};

use super::SaveKey;

/// Persists a tile as an opaque binary blob, keyed by
/// (mode, path, orbit, block, date, test_id).
pub trait SaveSink {
    fn save_tile(&mut self, key: &SaveKey, tile: &CloudMaskTile) -> Result<(), RccmError>;
}

/// Writes one file per camera under
/// `root/{tile.directory_name()}/{mode}/{stage}_{camera}_{dates}.bin`.
///
/// The blob is the raw class bytes in native row order — no framing beyond
/// that; the format is internal to this workspace, not a shared exchange
/// format.
pub struct FsSaveSink {
    root: PathBuf,
}

impl FsSaveSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SaveSink for FsSaveSink {
    fn save_tile(&mut self, key: &SaveKey, tile: &CloudMaskTile) -> Result<(), RccmError> {
        let dir = self.root.join(key.tile.directory_name()).join(key.mode);
        std::fs::create_dir_all(&dir)
            .map_err(|e| RccmError::SinkFailure(format!("creating {}: {e}", dir.display())))?;

        for camera in ALL_CAMERAS {
            let path = dir.join(key.file_name(camera, "bin"));
            let bytes: Vec<u8> = tile
                .camera_plane(camera)
                .iter()
                .map(|c| c.to_raw())
                .collect();
            let mut file = std::fs::File::create(&path)
                .map_err(|e| RccmError::SinkFailure(format!("creating {}: {e}", path.display())))?;
            file.write_all(&bytes)
                .map_err(|e| RccmError::SinkFailure(format!("writing {}: {e}", path.display())))?;
        }
        tracing::info!(stage = %key.stage, mode = key.mode, "saved tile");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rccm_types::{CameraIndex, ClassCode, StageId, TileKey};

    #[test]
    fn round_trips_raw_bytes_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSaveSink::new(dir.path());
        let mut tile = CloudMaskTile::filled(ClassCode::Missing);
        tile.set(CameraIndex::An, 5, 5, ClassCode::CloudHigh);

        let key = SaveKey {
            mode: "repair",
            tile: TileKey {
                path: 1,
                orbit: 2,
                block: 3,
                test_id: String::new(),
                edge: false,
            },
            stage: StageId::Stage3,
            acquisition_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            generation_date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
        };
        sink.save_tile(&key, &tile).unwrap();

        let path = dir
            .path()
            .join(key.tile.directory_name())
            .join(key.mode)
            .join(key.file_name(CameraIndex::An, "bin"));
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(bytes.len(), rccm_types::SAMPLES * rccm_types::LINES);
        let idx = 5 * rccm_types::LINES + 5;
        assert_eq!(bytes[idx], ClassCode::CloudHigh.to_raw());
    }
}
