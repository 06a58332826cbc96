//! Orbit catalog: lists the orbit identifiers available under a root, used
//! by the orbit sweep to intersect radiance and RCCM coverage before
//! running anything.

use std::collections::BTreeSet;
use std::path::Path;

use rccm_types::{OrbitId, RccmError};

/// Enumerates the orbit identifiers available under a root directory.
pub trait OrbitCatalog {
    fn list_orbits(&self, root: &Path) -> Result<BTreeSet<OrbitId>, RccmError>;
}

/// Scans a directory's immediate entries for a run of six decimal digits in
/// each filename, the fixed width of a MISR orbit number, and treats the
/// first such run as that file's orbit. Unreadable or unparseable entries
/// are skipped rather than failing the whole scan.
pub struct FsOrbitCatalog;

impl FsOrbitCatalog {
    pub fn new() -> Self {
        Self
    }

    fn parse_orbit(name: &str) -> Option<OrbitId> {
        let bytes = name.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i].is_ascii_digit() {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i - start == 6 {
                    if let Ok(n) = name[start..i].parse::<OrbitId>() {
                        return Some(n);
                    }
                }
            } else {
                i += 1;
            }
        }
        None
    }
}

impl Default for FsOrbitCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCatalog for FsOrbitCatalog {
    fn list_orbits(&self, root: &Path) -> Result<BTreeSet<OrbitId>, RccmError> {
        let entries = std::fs::read_dir(root)
            .map_err(|e| RccmError::Unreadable(format!("{}: {e}", root.display())))?;
        let mut orbits = BTreeSet::new();
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(orbit) = Self::parse_orbit(name) {
                    orbits.insert(orbit);
                }
            }
        }
        Ok(orbits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_orbit_numbers_from_filenames() {
        assert_eq!(FsOrbitCatalog::parse_orbit("MISR_AM1_GRP_RCCM_GM_P037_O012345_DF.hdf"), Some(12345));
        assert_eq!(FsOrbitCatalog::parse_orbit("readme.txt"), None);
        assert_eq!(FsOrbitCatalog::parse_orbit("not_six_1234.hdf"), None);
    }

    #[test]
    fn lists_orbits_found_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("O012345_DF.hdf"), b"").unwrap();
        std::fs::write(dir.path().join("O012346_DF.hdf"), b"").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();

        let catalog = FsOrbitCatalog::new();
        let orbits = catalog.list_orbits(dir.path()).unwrap();
        assert_eq!(orbits.len(), 2);
        assert!(orbits.contains(&12345));
        assert!(orbits.contains(&12346));
    }

    #[test]
    fn unreadable_root_reports_unreadable() {
        let catalog = FsOrbitCatalog::new();
        let result = catalog.list_orbits(Path::new("/does/not/exist"));
        assert!(matches!(result, Err(RccmError::Unreadable(_))));
    }
}
