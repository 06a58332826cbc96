use std::path::PathBuf;

use rccm_io::fakes::FakeCameraReader;
use rccm_io::CameraPlane;
use rccm_types::{CameraIndex, ClassCode, ALL_CAMERAS, LINES, SAMPLES};

pub fn uniform_plane(class: ClassCode) -> CameraPlane {
    CameraPlane {
        samples: SAMPLES,
        lines: LINES,
        cells: vec![class; SAMPLES * LINES],
    }
}

pub fn nine_files() -> [PathBuf; 9] {
    ALL_CAMERAS.map(|c| PathBuf::from(format!("{}.hdf", c.name())))
}

/// A reader where every camera is `base` except the ones overridden in
/// `overrides`.
pub fn reader_with(base: ClassCode, overrides: &[(CameraIndex, CameraPlane)]) -> FakeCameraReader {
    ALL_CAMERAS.iter().fold(FakeCameraReader::new(), |r, &c| {
        match overrides.iter().find(|(oc, _)| *oc == c) {
            Some((_, plane)) => r.with_plane(c, plane.clone()),
            None => r.with_plane(c, uniform_plane(base)),
        }
    })
}
