//! Identity of the block/orbit/path a tile belongs to.

/// A repeating ground track; MISR has 233 distinct paths.
pub type PathId = u16;

/// A single revolution; belongs to exactly one path.
pub type OrbitId = u32;

/// A fixed geographic tile index along a path.
pub type BlockId = u16;

/// Identifies a tile for persistence (save/map sinks) and log correlation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub path: PathId,
    pub orbit: OrbitId,
    pub block: BlockId,
    /// Empty when the evaluation harness is disabled.
    pub test_id: String,
    /// Whether Stage2's edge-extension rule was enabled for this run.
    pub edge: bool,
}

impl TileKey {
    /// Directory name under the save/map root:
    /// `{path}-{orbit}-{block}/GM/RCCM[_{test_id}][_edge]`.
    pub fn directory_name(&self) -> String {
        let mut name = format!("{}-{}-{}/GM/RCCM", self.path, self.orbit, self.block);
        if !self.test_id.is_empty() {
            name.push('_');
            name.push_str(&self.test_id);
        }
        if self.edge {
            name.push_str("_edge");
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_name_omits_optional_suffixes_by_default() {
        let key = TileKey {
            path: 37,
            orbit: 12345,
            block: 55,
            test_id: String::new(),
            edge: false,
        };
        assert_eq!(key.directory_name(), "37-12345-55/GM/RCCM");
    }

    #[test]
    fn directory_name_includes_test_id_and_edge_suffixes() {
        let key = TileKey {
            path: 37,
            orbit: 12345,
            block: 55,
            test_id: "eval1".to_string(),
            edge: true,
        };
        assert_eq!(key.directory_name(), "37-12345-55/GM/RCCM_eval1_edge");
    }
}
