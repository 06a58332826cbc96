//! Stage1: resolves value-0 ambiguity into genuine gap, obscured, or edge
//! by cross-referencing radiance availability.

use rccm_types::{ClassCode, CloudMaskTile, MissingCounts, Presence, RadianceAvailability, ALL_CAMERAS};

/// Result of flagging a Stage0 tile against radiance availability.
pub struct Stage1Output {
    pub tile: CloudMaskTile,
    pub counts: MissingCounts,
}

/// For every gap in `input`, reclassifies to edge (254) if radiance is
/// structurally absent, obscured (253) if blocked by terrain, or leaves it
/// as a genuine gap (0) if radiance is present but retrieval failed. Valid
/// and already-unobservable values pass through unchanged.
///
/// Performs no I/O; `availability` is borrowed read-only and not retained.
pub fn flag(input: &CloudMaskTile, availability: &RadianceAvailability) -> Stage1Output {
    let mut tile = input.clone();

    for camera in ALL_CAMERAS {
        for (sample, line) in CloudMaskTile::positions() {
            if !tile.get(camera, sample, line).is_gap() {
                continue;
            }
            let new_class = match availability.get(camera, sample, line) {
                Presence::StructurallyAbsent => ClassCode::Edge,
                Presence::Obscured => ClassCode::Obscured,
                Presence::Present => ClassCode::Missing,
            };
            tile.set(camera, sample, line, new_class);
        }
    }

    let counts = MissingCounts::from_tile(&tile);
    tracing::info!(total_missing = counts.total(), "stage1 flagged");
    Stage1Output { tile, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rccm_types::CameraIndex;

    #[test]
    fn structural_absence_becomes_edge() {
        let mut input = CloudMaskTile::filled(ClassCode::ClearHigh);
        input.set(CameraIndex::Df, 10, 10, ClassCode::Missing);
        let mut avail = RadianceAvailability::all_present();
        avail.set(CameraIndex::Df, 10, 10, Presence::StructurallyAbsent);

        let out = flag(&input, &avail);
        assert_eq!(out.tile.get(CameraIndex::Df, 10, 10), ClassCode::Edge);
    }

    #[test]
    fn obscuration_becomes_obscured() {
        let mut input = CloudMaskTile::filled(ClassCode::ClearHigh);
        input.set(CameraIndex::Df, 10, 10, ClassCode::Missing);
        let mut avail = RadianceAvailability::all_present();
        avail.set(CameraIndex::Df, 10, 10, Presence::Obscured);

        let out = flag(&input, &avail);
        assert_eq!(out.tile.get(CameraIndex::Df, 10, 10), ClassCode::Obscured);
    }

    #[test]
    fn present_radiance_leaves_genuine_gap() {
        let mut input = CloudMaskTile::filled(ClassCode::ClearHigh);
        input.set(CameraIndex::Df, 10, 10, ClassCode::Missing);
        let avail = RadianceAvailability::all_present();

        let out = flag(&input, &avail);
        assert_eq!(out.tile.get(CameraIndex::Df, 10, 10), ClassCode::Missing);
    }

    #[test]
    fn valid_and_unobservable_values_pass_through() {
        let mut input = CloudMaskTile::filled(ClassCode::ClearHigh);
        input.set(CameraIndex::Df, 1, 1, ClassCode::Fill);
        input.set(CameraIndex::Df, 2, 2, ClassCode::CloudLow);
        let avail = RadianceAvailability::all_present();

        let out = flag(&input, &avail);
        assert_eq!(out.tile.get(CameraIndex::Df, 1, 1), ClassCode::Fill);
        assert_eq!(out.tile.get(CameraIndex::Df, 2, 2), ClassCode::CloudLow);
    }
}
