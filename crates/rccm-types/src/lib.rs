//! Value types shared across the RCCM repair pipeline: the classification
//! vocabulary, the fixed-shape tile, the nine-camera ordering, and the
//! per-stage diagnostics (missing counts, confusion matrices, anomalies).
//!
//! Every type here is stage-scoped: created by one stage, handed to the
//! next, released when the pipeline exits or short-circuits. None of it
//! owns a file handle or performs I/O; that lives in `rccm-io`.

pub mod anomaly;
pub mod block;
pub mod camera;
pub mod class_code;
pub mod confusion;
pub mod counts;
pub mod error;
pub mod radiance;
pub mod stage;
pub mod tile;

pub use anomaly::{AnomalyEntry, AnomalyLog};
pub use block::{BlockId, OrbitId, PathId, TileKey};
pub use camera::{CameraIndex, CameraMetadata, ALL_CAMERAS, NUM_CAMERAS};
pub use class_code::ClassCode;
pub use confusion::ConfusionMatrix;
pub use counts::MissingCounts;
pub use error::RccmError;
pub use radiance::{Presence, RadianceAvailability};
pub use stage::StageId;
pub use tile::{CloudMaskTile, LINES, SAMPLES};
