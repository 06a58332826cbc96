//! The fixed-shape 9 x 512 x 128 classification tile.

use crate::camera::{CameraIndex, NUM_CAMERAS};
use crate::class_code::ClassCode;

/// Lateral extent of a block: 512 samples (cross-track) by 128 lines
/// (along-track).
pub const SAMPLES: usize = 512;
pub const LINES: usize = 128;
const PLANE_LEN: usize = SAMPLES * LINES;

/// A 9 x 512 x 128 classification tile, flat-packed in camera-major,
/// sample-major, line-minor order (mirroring the palette-backed flat
/// storage used for chunk data elsewhere in this workspace).
///
/// Owned exclusively by the stage that produced it; stages move the tile
/// forward rather than mutating a shared buffer in place.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudMaskTile {
    cells: Vec<ClassCode>,
}

impl CloudMaskTile {
    /// A tile with every cell set to `fill`.
    pub fn filled(fill: ClassCode) -> Self {
        Self {
            cells: vec![fill; NUM_CAMERAS * PLANE_LEN],
        }
    }

    fn linear_index(camera: CameraIndex, sample: usize, line: usize) -> usize {
        debug_assert!(sample < SAMPLES && line < LINES);
        camera.index() * PLANE_LEN + sample * LINES + line
    }

    pub fn get(&self, camera: CameraIndex, sample: usize, line: usize) -> ClassCode {
        self.cells[Self::linear_index(camera, sample, line)]
    }

    pub fn set(&mut self, camera: CameraIndex, sample: usize, line: usize, value: ClassCode) {
        let idx = Self::linear_index(camera, sample, line);
        self.cells[idx] = value;
    }

    /// Replace an entire camera's plane in native row order (sample-major,
    /// line-minor), e.g. as read by [`crate::camera::CameraMetadata`]'s
    /// owning reader.
    pub fn set_camera_plane(&mut self, camera: CameraIndex, plane: &[ClassCode]) {
        assert_eq!(plane.len(), PLANE_LEN, "camera plane must be 512x128");
        let start = camera.index() * PLANE_LEN;
        self.cells[start..start + PLANE_LEN].copy_from_slice(plane);
    }

    /// Borrow one camera's plane as a flat sample-major slice.
    pub fn camera_plane(&self, camera: CameraIndex) -> &[ClassCode] {
        let start = camera.index() * PLANE_LEN;
        &self.cells[start..start + PLANE_LEN]
    }

    /// Number of gaps (value 0 / [`ClassCode::Missing`]) in one camera.
    pub fn camera_missing_count(&self, camera: CameraIndex) -> u32 {
        self.camera_plane(camera)
            .iter()
            .filter(|c| c.is_gap())
            .count() as u32
    }

    /// Iterate over `(sample, line)` pairs in row-major order for one
    /// camera's plane.
    pub fn positions() -> impl Iterator<Item = (usize, usize)> {
        (0..SAMPLES).flat_map(|s| (0..LINES).map(move |l| (s, l)))
    }
}
