//! Per-camera 5x5 confusion matrices populated by the evaluation harness.

use crate::camera::{CameraIndex, NUM_CAMERAS};
use crate::class_code::ClassCode;

/// Row/column order: CloudHigh, CloudLow, ClearLow, ClearHigh, Missing —
/// matching [`ClassCode::confusion_index`].
const DIM: usize = 5;

/// A per-camera 5x5 table indexed by (original class, reconstructed class).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    cells: [[[u64; DIM]; DIM]; NUM_CAMERAS],
}

impl Default for ConfusionMatrix {
    fn default() -> Self {
        Self {
            cells: [[[0; DIM]; DIM]; NUM_CAMERAS],
        }
    }
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pixel: `original` is the checkpointed class before the
    /// harness blanked it, `reconstructed` is what the pipeline produced.
    /// No-op if either class has no confusion-matrix slot (i.e. is not one
    /// of {1,2,3,4,0}).
    pub fn record(&mut self, camera: CameraIndex, original: ClassCode, reconstructed: ClassCode) {
        if let (Some(row), Some(col)) = (original.confusion_index(), reconstructed.confusion_index())
        {
            self.cells[camera.index()][row][col] += 1;
        }
    }

    pub fn cell(&self, camera: CameraIndex, original: ClassCode, reconstructed: ClassCode) -> u64 {
        match (original.confusion_index(), reconstructed.confusion_index()) {
            (Some(row), Some(col)) => self.cells[camera.index()][row][col],
            _ => 0,
        }
    }

    /// Sum of every cell for one camera.
    pub fn total(&self, camera: CameraIndex) -> u64 {
        self.cells[camera.index()]
            .iter()
            .flat_map(|row| row.iter())
            .sum()
    }

    /// Sum of cells for one camera where the reconstructed class is a valid
    /// observation {1,2,3,4} (i.e. column != Missing).
    pub fn total_reconstructed_valid(&self, camera: CameraIndex) -> u64 {
        self.cells[camera.index()]
            .iter()
            .map(|row| row[0] + row[1] + row[2] + row[3])
            .sum()
    }

    /// Sum of the row for `original` class (used by the harness symmetry
    /// test: total pixels artificially blanked with this original class).
    pub fn row_sum(&self, camera: CameraIndex, original: ClassCode) -> u64 {
        match original.confusion_index() {
            Some(row) => self.cells[camera.index()][row].iter().sum(),
            None => 0,
        }
    }
}
