//! Stage identity, used to key log lines, confusion matrices and persisted
//! file names.

use std::fmt;

/// Which of the four pipeline stages produced a tile or diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageId {
    Stage0,
    Stage1,
    Stage2,
    Stage3,
}

impl StageId {
    /// Short form used in persisted filenames (`rccm0`..`rccm3`).
    pub fn file_tag(self) -> &'static str {
        match self {
            StageId::Stage0 => "rccm0",
            StageId::Stage1 => "rccm1",
            StageId::Stage2 => "rccm2",
            StageId::Stage3 => "rccm3",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_tags_are_distinct() {
        let tags = [
            StageId::Stage0.file_tag(),
            StageId::Stage1.file_tag(),
            StageId::Stage2.file_tag(),
            StageId::Stage3.file_tag(),
        ];
        let mut unique = tags.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 4);
    }
}
