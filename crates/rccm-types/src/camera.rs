//! The fixed nine-camera ordering and its adjacency relations.
//!
//! Lifts the "implicit camera-order convention" (DF...DA) into an enum with
//! constant adjacency so stages never index tiles by magic numbers.

use serde::{Deserialize, Serialize};

/// One of MISR's nine fixed view angles, ordered fore-to-aft through nadir.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CameraIndex {
    Df = 0,
    Cf = 1,
    Bf = 2,
    Af = 3,
    An = 4,
    Aa = 5,
    Ba = 6,
    Ca = 7,
    Da = 8,
}

/// Total number of cameras per block.
pub const NUM_CAMERAS: usize = 9;

/// Native camera order, DF...DA.
pub const ALL_CAMERAS: [CameraIndex; NUM_CAMERAS] = [
    CameraIndex::Df,
    CameraIndex::Cf,
    CameraIndex::Bf,
    CameraIndex::Af,
    CameraIndex::An,
    CameraIndex::Aa,
    CameraIndex::Ba,
    CameraIndex::Ca,
    CameraIndex::Da,
];

impl CameraIndex {
    /// Build from a 0..8 index in native camera order.
    pub fn from_index(i: usize) -> Self {
        ALL_CAMERAS[i]
    }

    /// 0-based index in native camera order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Three-letter MISR camera name.
    pub fn name(self) -> &'static str {
        match self {
            CameraIndex::Df => "DF",
            CameraIndex::Cf => "CF",
            CameraIndex::Bf => "BF",
            CameraIndex::Af => "AF",
            CameraIndex::An => "AN",
            CameraIndex::Aa => "AA",
            CameraIndex::Ba => "BA",
            CameraIndex::Ca => "CA",
            CameraIndex::Da => "DA",
        }
    }

    /// The two neighbour cameras Stage2 cross-references for this camera.
    ///
    /// Interior cameras (CF..CA) use the previous and next camera. The two
    /// extreme cameras use same-side neighbours instead, since they have no
    /// "previous"/"next" on one flank: DF uses {CF, BF} (both forward), DA
    /// uses {BA, CA} (both aft).
    pub fn stage2_neighbours(self) -> (CameraIndex, CameraIndex) {
        match self {
            CameraIndex::Df => (CameraIndex::Cf, CameraIndex::Bf),
            CameraIndex::Da => (CameraIndex::Ba, CameraIndex::Ca),
            _ => (
                CameraIndex::from_index(self.index() - 1),
                CameraIndex::from_index(self.index() + 1),
            ),
        }
    }

    /// Edge-extension check order for this camera: the neighbour checked
    /// first is the more inclined (narrower) one, reflecting that a closer
    /// neighbour is the more reliable witness.
    ///
    /// For cameras at or before nadir (index <= 4): previous, then next.
    /// For cameras after nadir (index > 4): next, then previous.
    pub fn edge_extension_order(self) -> (CameraIndex, CameraIndex) {
        let (prev, next) = self.stage2_neighbours();
        if self.index() <= CameraIndex::An.index() {
            (prev, next)
        } else {
            (next, prev)
        }
    }
}

/// Per-camera constants beyond adjacency: the MISR name and angle-ordering
/// index. Adjacency is queried directly from [`CameraIndex`] rather than
/// duplicated here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraMetadata {
    pub index: CameraIndex,
    pub name: &'static str,
    pub angle_order: u8,
}

impl CameraMetadata {
    pub fn of(index: CameraIndex) -> Self {
        Self {
            index,
            name: index.name(),
            angle_order: index.index() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_order_matches_df_to_da() {
        let names: Vec<_> = ALL_CAMERAS.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["DF", "CF", "BF", "AF", "AN", "AA", "BA", "CA", "DA"]
        );
    }

    #[test]
    fn interior_cameras_use_prev_and_next() {
        assert_eq!(
            CameraIndex::An.stage2_neighbours(),
            (CameraIndex::Af, CameraIndex::Aa)
        );
    }

    #[test]
    fn extreme_cameras_use_same_side_neighbours() {
        assert_eq!(
            CameraIndex::Df.stage2_neighbours(),
            (CameraIndex::Cf, CameraIndex::Bf)
        );
        assert_eq!(
            CameraIndex::Da.stage2_neighbours(),
            (CameraIndex::Ba, CameraIndex::Ca)
        );
    }

    #[test]
    fn edge_extension_order_flips_at_nadir() {
        // AF (index 3, <= 4): previous-first.
        let (first, second) = CameraIndex::Af.edge_extension_order();
        assert_eq!((first, second), CameraIndex::Af.stage2_neighbours());

        // AA (index 5, > 4): next-first, i.e. reversed from stage2_neighbours.
        let (prev, next) = CameraIndex::Aa.stage2_neighbours();
        assert_eq!(CameraIndex::Aa.edge_extension_order(), (next, prev));
    }
}
