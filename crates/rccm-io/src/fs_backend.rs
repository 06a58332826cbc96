//! Filesystem-backed `FileLocator`, `RccmCameraReader` and `RadianceReader`
//! over the workspace's own raw-byte layout (the same one [`crate::sinks::FsSaveSink`]
//! writes). Native HDF decoding stays an external collaborator (spec.md §6);
//! this module lets `rccm-cli` run end to end against files this workspace
//! itself produced or a test harness staged in that layout.

use std::path::{Path, PathBuf};

use rccm_types::{
    BlockId, CameraIndex, ClassCode, OrbitId, Presence, RadianceAvailability, RccmError,
    ALL_CAMERAS, LINES, NUM_CAMERAS, SAMPLES,
};

use crate::locator::FileLocator;
use crate::reader::{CameraPlane, RadianceReader, RccmCameraReader};

/// Resolves `root/{CAMERA}_{orbit}.bin` for each of the nine cameras.
pub struct FsFileLocator;

impl FsFileLocator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsFileLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLocator for FsFileLocator {
    fn locate(&self, root: &Path, orbit: OrbitId) -> Result<[PathBuf; 9], RccmError> {
        let mut found = Vec::with_capacity(9);
        let mut missing = Vec::new();
        for camera in ALL_CAMERAS {
            let path = root.join(format!("{}_{orbit}.bin", camera.name()));
            if path.is_file() {
                found.push(path);
            } else {
                missing.push(camera.name());
            }
        }

        if found.is_empty() {
            return Err(RccmError::Missing(format!(
                "no camera files for orbit {orbit} under {}",
                root.display()
            )));
        }
        if found.len() < 9 {
            return Err(RccmError::Incomplete {
                found: found.len(),
                detail: format!("orbit {orbit}: missing {}", missing.join(", ")),
            });
        }
        Ok(found.try_into().expect("exactly nine entries checked above"))
    }
}

/// Reads a camera plane as `SAMPLES * LINES` raw class bytes, sample-major
/// then line-minor, the same layout [`crate::sinks::FsSaveSink`] writes.
pub struct FsCameraReader;

impl FsCameraReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsCameraReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RccmCameraReader for FsCameraReader {
    fn open_rccm_camera(
        &self,
        file: &Path,
        _camera: CameraIndex,
        _block: BlockId,
    ) -> Result<CameraPlane, RccmError> {
        let bytes = std::fs::read(file)
            .map_err(|e| RccmError::Unreadable(format!("{}: {e}", file.display())))?;
        if bytes.len() != SAMPLES * LINES {
            return Err(RccmError::ShapeMismatch {
                expected_samples: SAMPLES,
                expected_lines: LINES,
                got_samples: bytes.len() / LINES.max(1),
                got_lines: LINES,
                detail: format!("{}: {} bytes", file.display(), bytes.len()),
            });
        }
        Ok(CameraPlane {
            samples: SAMPLES,
            lines: LINES,
            cells: bytes.into_iter().map(ClassCode::from_raw).collect(),
        })
    }
}

/// Reads `root/radiance_{orbit}_{block}.bin`: `NUM_CAMERAS * SAMPLES * LINES`
/// bytes, one per pixel, `0` present / `1` structurally absent / `2` obscured,
/// in the same per-camera plane order as [`RadianceAvailability`].
pub struct FsRadianceReader;

impl FsRadianceReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsRadianceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RadianceReader for FsRadianceReader {
    fn open_radiance(
        &self,
        path: &Path,
        orbit: OrbitId,
        block: BlockId,
    ) -> Result<RadianceAvailability, RccmError> {
        let file = path.join(format!("radiance_{orbit}_{block}.bin"));
        let bytes = std::fs::read(&file)
            .map_err(|e| RccmError::Unreadable(format!("{}: {e}", file.display())))?;
        let expected = NUM_CAMERAS * SAMPLES * LINES;
        if bytes.len() != expected {
            return Err(RccmError::ShapeMismatch {
                expected_samples: SAMPLES,
                expected_lines: LINES,
                got_samples: bytes.len() / (NUM_CAMERAS * LINES).max(1),
                got_lines: LINES,
                detail: format!("{}: {} bytes", file.display(), bytes.len()),
            });
        }
        let cells = bytes
            .into_iter()
            .map(|b| match b {
                0 => Ok(Presence::Present),
                1 => Ok(Presence::StructurallyAbsent),
                2 => Ok(Presence::Obscured),
                other => Err(RccmError::Unreadable(format!(
                    "{}: invalid presence byte {other}",
                    file.display()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RadianceAvailability::from_cells(cells))
    }
}
