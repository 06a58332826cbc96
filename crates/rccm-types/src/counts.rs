//! Per-camera remaining-gap counts, the pipeline's primary termination
//! signal.

use crate::camera::{CameraIndex, NUM_CAMERAS};
use crate::tile::CloudMaskTile;

/// Number of gaps remaining in each camera at the end of a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MissingCounts {
    per_camera: [u32; NUM_CAMERAS],
}

impl MissingCounts {
    pub fn from_tile(tile: &CloudMaskTile) -> Self {
        let mut per_camera = [0u32; NUM_CAMERAS];
        for camera in crate::camera::ALL_CAMERAS {
            per_camera[camera.index()] = tile.camera_missing_count(camera);
        }
        Self { per_camera }
    }

    pub fn camera(&self, camera: CameraIndex) -> u32 {
        self.per_camera[camera.index()]
    }

    pub fn total(&self) -> u32 {
        self.per_camera.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (CameraIndex, u32)> + '_ {
        crate::camera::ALL_CAMERAS
            .into_iter()
            .map(move |c| (c, self.per_camera[c.index()]))
    }

    /// Cameras in ascending missing-count order, ties broken by camera
    /// index — the processing order Stage2 computes once at entry.
    pub fn ascending_order(&self) -> Vec<CameraIndex> {
        let mut cameras: Vec<CameraIndex> = crate::camera::ALL_CAMERAS.to_vec();
        cameras.sort_by_key(|c| (self.camera(*c), c.index()));
        cameras
    }

    /// True if every camera's count in `self` is <= the matching count in
    /// `prior` (the monotone gap-reduction invariant).
    pub fn is_monotone_non_increasing_from(&self, prior: &MissingCounts) -> bool {
        crate::camera::ALL_CAMERAS
            .iter()
            .all(|c| self.camera(*c) <= prior.camera(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraIndex;
    use crate::class_code::ClassCode;

    #[test]
    fn ascending_order_breaks_ties_by_camera_index() {
        let mut tile = CloudMaskTile::filled(ClassCode::ClearHigh);
        tile.set(CameraIndex::Da, 0, 0, ClassCode::Missing);
        tile.set(CameraIndex::Df, 0, 0, ClassCode::Missing);
        let counts = MissingCounts::from_tile(&tile);
        let order = counts.ascending_order();
        // DF and DA both have 1 missing pixel and are tied; DF (index 0)
        // sorts before DA (index 8).
        assert!(order.iter().position(|&c| c == CameraIndex::Df).unwrap()
            < order.iter().position(|&c| c == CameraIndex::Da).unwrap());
    }

    #[test]
    fn monotone_check_detects_increase() {
        let a = MissingCounts::default();
        let mut b = MissingCounts::default();
        b.per_camera[0] = 1;
        assert!(a.is_monotone_non_increasing_from(&b));
        assert!(!b.is_monotone_non_increasing_from(&a));
    }
}
