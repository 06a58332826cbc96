//! The reduced radiance-availability view Stage1 consumes.

use crate::camera::{CameraIndex, NUM_CAMERAS};
use crate::tile::{LINES, SAMPLES};

const PLANE_LEN: usize = SAMPLES * LINES;

/// Per-pixel observability, already aggregated across the four radiance
/// bands as "at least one band present" — the only distinction Stage1
/// needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Radiance observed at this position.
    Present,
    /// No radiance: outside the camera's instantaneous swath.
    StructurallyAbsent,
    /// No radiance: blocked by terrain.
    Obscured,
}

/// A 9-camera x 512 x 128 bitmap of [`Presence`], borrowed read-only by
/// Stage1 and discarded afterwards.
#[derive(Clone, Debug)]
pub struct RadianceAvailability {
    cells: Vec<Presence>,
}

impl RadianceAvailability {
    /// A tri-state map with every pixel reported present.
    pub fn all_present() -> Self {
        Self {
            cells: vec![Presence::Present; NUM_CAMERAS * PLANE_LEN],
        }
    }

    pub fn from_cells(cells: Vec<Presence>) -> Self {
        assert_eq!(cells.len(), NUM_CAMERAS * PLANE_LEN);
        Self { cells }
    }

    fn linear_index(camera: CameraIndex, sample: usize, line: usize) -> usize {
        camera.index() * PLANE_LEN + sample * LINES + line
    }

    pub fn get(&self, camera: CameraIndex, sample: usize, line: usize) -> Presence {
        self.cells[Self::linear_index(camera, sample, line)]
    }

    pub fn set(&mut self, camera: CameraIndex, sample: usize, line: usize, value: Presence) {
        let idx = Self::linear_index(camera, sample, line);
        self.cells[idx] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_present_everywhere() {
        let avail = RadianceAvailability::all_present();
        assert_eq!(avail.get(CameraIndex::Df, 0, 0), Presence::Present);
        assert_eq!(avail.get(CameraIndex::Da, 511, 127), Presence::Present);
    }

    #[test]
    fn set_is_isolated_per_camera_and_pixel() {
        let mut avail = RadianceAvailability::all_present();
        avail.set(CameraIndex::Df, 10, 10, Presence::Obscured);
        assert_eq!(avail.get(CameraIndex::Df, 10, 10), Presence::Obscured);
        assert_eq!(avail.get(CameraIndex::Df, 10, 11), Presence::Present);
        assert_eq!(avail.get(CameraIndex::Cf, 10, 10), Presence::Present);
    }
}
