//! Reader contracts: native HDF tile decoding is an external collaborator,
//! this crate only defines the narrow view the core consumes.

use std::path::Path;

use rccm_types::{BlockId, CameraIndex, ClassCode, OrbitId, RadianceAvailability, RccmError};

/// One camera's 512x128 classification plane, in native row-major order
/// (sample-major, line-minor — matching [`rccm_types::CloudMaskTile::set_camera_plane`]).
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPlane {
    pub samples: usize,
    pub lines: usize,
    pub cells: Vec<ClassCode>,
}

/// Opens the companion radiance product and reduces it to per-pixel
/// observability. Implementations read the native L1B2 HDF tiles; this
/// crate exposes only the reduced tri-state view Stage1 needs.
pub trait RadianceReader {
    fn open_radiance(
        &self,
        path: &Path,
        orbit: OrbitId,
        block: BlockId,
    ) -> Result<RadianceAvailability, RccmError>;
}

/// Opens one camera's standard RCCM mask for a block.
pub trait RccmCameraReader {
    fn open_rccm_camera(
        &self,
        file: &Path,
        camera: CameraIndex,
        block: BlockId,
    ) -> Result<CameraPlane, RccmError>;
}
