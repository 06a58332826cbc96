//! External collaborator contracts: readers, file discovery, and output
//! sinks. This crate defines the narrow interfaces the core pipeline uses;
//! native HDF decoding and real CLI path resolution stay external.

pub mod catalog;
pub mod fs_backend;
pub mod locator;
pub mod reader;
pub mod sinks;

#[cfg(feature = "testing")]
pub mod fakes;

pub use catalog::{FsOrbitCatalog, OrbitCatalog};
pub use fs_backend::{FsCameraReader, FsFileLocator, FsRadianceReader};
pub use locator::FileLocator;
pub use reader::{CameraPlane, RadianceReader, RccmCameraReader};
pub use sinks::{FsLogSink, FsMapSink, FsSaveSink, LogSink, MapSink, SaveKey, SaveSink};
