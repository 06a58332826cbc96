//! In-memory fakes for tests: no filesystem, no HDF. These are test
//! fixtures used by downstream crates' test suites, never a second
//! production backend.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use rccm_types::{BlockId, CameraIndex, OrbitId, RadianceAvailability, RccmError};

use crate::catalog::OrbitCatalog;
use crate::locator::FileLocator;
use crate::reader::{CameraPlane, RadianceReader, RccmCameraReader};

/// A [`RadianceReader`] that returns a pre-built availability map regardless
/// of the requested path/orbit/block, or a canned failure.
pub struct FakeRadianceReader {
    pub result: Result<RadianceAvailability, RccmError>,
}

impl FakeRadianceReader {
    pub fn always(availability: RadianceAvailability) -> Self {
        Self {
            result: Ok(availability),
        }
    }

    pub fn failing(error: RccmError) -> Self {
        Self { result: Err(error) }
    }
}

impl RadianceReader for FakeRadianceReader {
    fn open_radiance(
        &self,
        _path: &Path,
        _orbit: OrbitId,
        _block: BlockId,
    ) -> Result<RadianceAvailability, RccmError> {
        match &self.result {
            Ok(avail) => Ok(avail.clone()),
            Err(_) => Err(RccmError::ReaderFailure("fake radiance reader failure".into())),
        }
    }
}

/// A [`RccmCameraReader`] backed by an in-memory map of camera -> plane.
/// Missing cameras yield [`RccmError::ReaderFailure`]; planes of the wrong
/// shape are accepted verbatim so callers can exercise `ShapeMismatch`
/// handling in the layer above.
#[derive(Default)]
pub struct FakeCameraReader {
    planes: HashMap<CameraIndex, CameraPlane>,
}

impl FakeCameraReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plane(mut self, camera: CameraIndex, plane: CameraPlane) -> Self {
        self.planes.insert(camera, plane);
        self
    }
}

impl RccmCameraReader for FakeCameraReader {
    fn open_rccm_camera(
        &self,
        _file: &Path,
        camera: CameraIndex,
        _block: BlockId,
    ) -> Result<CameraPlane, RccmError> {
        self.planes
            .get(&camera)
            .cloned()
            .ok_or_else(|| RccmError::ReaderFailure(format!("no fake plane for {camera:?}")))
    }
}

/// A [`FileLocator`] that always returns nine synthetic paths, or a canned
/// failure.
pub struct FakeFileLocator {
    pub result: Result<(), RccmError>,
}

impl FakeFileLocator {
    pub fn always_found() -> Self {
        Self { result: Ok(()) }
    }

    pub fn failing(error: RccmError) -> Self {
        Self { result: Err(error) }
    }
}

impl FileLocator for FakeFileLocator {
    fn locate(&self, root: &Path, orbit: OrbitId) -> Result<[PathBuf; 9], RccmError> {
        self.result.as_ref().map_err(|_| {
            RccmError::Missing(format!("no camera files for orbit {orbit} under {}", root.display()))
        })?;
        let paths: Vec<PathBuf> = rccm_types::ALL_CAMERAS
            .iter()
            .map(|c| root.join(format!("{}_{}.hdf", c.name(), orbit)))
            .collect();
        Ok(paths.try_into().unwrap())
    }
}

/// An [`OrbitCatalog`] backed by a fixed set, regardless of the requested
/// root.
pub struct FakeOrbitCatalog {
    pub orbits: BTreeSet<OrbitId>,
}

impl FakeOrbitCatalog {
    pub fn of(orbits: impl IntoIterator<Item = OrbitId>) -> Self {
        Self {
            orbits: orbits.into_iter().collect(),
        }
    }
}

impl OrbitCatalog for FakeOrbitCatalog {
    fn list_orbits(&self, _root: &Path) -> Result<BTreeSet<OrbitId>, RccmError> {
        Ok(self.orbits.clone())
    }
}
