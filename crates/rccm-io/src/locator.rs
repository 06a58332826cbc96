//! File discovery: given a path and orbit, resolve the nine per-camera
//! files in native camera order.

use std::path::{Path, PathBuf};

use rccm_types::{OrbitId, RccmError};

/// Resolves an orbit's nine camera files on disk.
///
/// Implementations list filenames under a root, parse the orbit identifier
/// out of each, and return failures distinguishing "no candidates" from
/// "too few" from "too many" from "found but unreadable".
pub trait FileLocator {
    fn locate(&self, root: &Path, orbit: OrbitId) -> Result<[PathBuf; 9], RccmError>;
}
