//! Stage0: ingests the nine per-camera standard masks into a fresh tile.

use std::path::Path;

use rccm_io::{CameraPlane, RccmCameraReader};
use rccm_types::{
    AnomalyLog, BlockId, ClassCode, CloudMaskTile, MissingCounts, RccmError, ALL_CAMERAS, LINES,
    SAMPLES,
};

/// Result of loading the nine camera planes into a fresh tile.
pub struct Stage0Output {
    pub tile: CloudMaskTile,
    pub counts: MissingCounts,
    pub anomalies: AnomalyLog,
}

/// Populates a fresh tile for `block`, reading each camera through `reader`
/// at the corresponding path in `files` (native camera order, DF..DA).
///
/// Values outside the enumerated `ClassCode` set are preserved verbatim in
/// the tile and recorded in the returned [`AnomalyLog`], never rewritten.
///
/// # Errors
///
/// `ReaderFailure` if any camera's read errors; `ShapeMismatch` if any
/// camera reports a lateral extent other than 512x128.
pub fn load(
    reader: &dyn RccmCameraReader,
    files: &[std::path::PathBuf; 9],
    block: BlockId,
) -> Result<Stage0Output, RccmError> {
    let mut tile = CloudMaskTile::filled(ClassCode::Missing);
    let mut anomalies = AnomalyLog::new();

    for camera in ALL_CAMERAS {
        let file: &Path = &files[camera.index()];
        let plane: CameraPlane = reader
            .open_rccm_camera(file, camera, block)
            .map_err(|e| RccmError::ReaderFailure(format!("{} ({camera:?}): {e}", file.display())))?;

        if plane.samples != SAMPLES || plane.lines != LINES {
            return Err(RccmError::ShapeMismatch {
                expected_samples: SAMPLES,
                expected_lines: LINES,
                got_samples: plane.samples,
                got_lines: plane.lines,
                detail: format!("camera {}", camera.name()),
            });
        }

        for sample in 0..SAMPLES {
            for line in 0..LINES {
                let class = plane.cells[sample * LINES + line];
                if class.is_anomalous() {
                    anomalies.record(camera, sample, line, class.to_raw());
                }
            }
        }
        tile.set_camera_plane(camera, &plane.cells);
    }

    let counts = MissingCounts::from_tile(&tile);
    tracing::info!(total_missing = counts.total(), anomalies = anomalies.len(), "stage0 loaded");
    Ok(Stage0Output {
        tile,
        counts,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rccm_io::fakes::FakeCameraReader;
    use rccm_types::CameraIndex;
    use std::path::PathBuf;

    fn uniform_plane(class: ClassCode) -> CameraPlane {
        CameraPlane {
            samples: SAMPLES,
            lines: LINES,
            cells: vec![class; SAMPLES * LINES],
        }
    }

    fn nine_files() -> [PathBuf; 9] {
        ALL_CAMERAS
            .map(|c| PathBuf::from(format!("{}.hdf", c.name())))
    }

    #[test]
    fn loads_all_nine_cameras() {
        let reader = ALL_CAMERAS.iter().fold(FakeCameraReader::new(), |r, &c| {
            r.with_plane(c, uniform_plane(ClassCode::ClearHigh))
        });
        let out = load(&reader, &nine_files(), 0).unwrap();
        assert_eq!(out.counts.total(), 0);
        assert!(out.anomalies.is_empty());
    }

    #[test]
    fn fails_with_reader_failure_when_a_camera_errors() {
        let reader = FakeCameraReader::new(); // no planes registered at all
        let result = load(&reader, &nine_files(), 0);
        assert!(matches!(result, Err(RccmError::ReaderFailure(_))));
    }

    #[test]
    fn fails_with_shape_mismatch_on_wrong_extent() {
        let mut plane = uniform_plane(ClassCode::ClearHigh);
        plane.samples = 256;
        plane.cells = vec![ClassCode::ClearHigh; 256 * LINES];
        let reader = ALL_CAMERAS.iter().fold(FakeCameraReader::new(), |r, &c| {
            if c == CameraIndex::Df {
                r.with_plane(c, plane.clone())
            } else {
                r.with_plane(c, uniform_plane(ClassCode::ClearHigh))
            }
        });
        let result = load(&reader, &nine_files(), 0);
        assert!(matches!(result, Err(RccmError::ShapeMismatch { .. })));
    }

    #[test]
    fn preserves_anomalous_raw_values_and_flags_them() {
        let mut plane = uniform_plane(ClassCode::ClearHigh);
        plane.cells[0] = ClassCode::from_raw(200);
        let reader = ALL_CAMERAS.iter().fold(FakeCameraReader::new(), |r, &c| {
            if c == CameraIndex::Df {
                r.with_plane(c, plane.clone())
            } else {
                r.with_plane(c, uniform_plane(ClassCode::ClearHigh))
            }
        });
        let out = load(&reader, &nine_files(), 0).unwrap();
        assert_eq!(out.anomalies.len(), 1);
        assert_eq!(out.tile.get(CameraIndex::Df, 0, 0).to_raw(), 200);
    }
}
