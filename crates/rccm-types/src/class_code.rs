//! The eight-value classification vocabulary carried by every tile cell.

use serde::{Deserialize, Serialize};

/// A single classification byte, as produced by the standard RCCM product.
///
/// Values outside the enumerated set are preserved as [`ClassCode::Other`]
/// rather than rejected (spec open question: unenumerated Stage0 values are
/// kept verbatim and flagged as anomalies, never rewritten).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassCode {
    /// 0 — no retrieval yet; may later resolve to a genuine gap, edge or
    /// obscured pixel.
    Missing,
    /// 1 — cloud, high confidence.
    CloudHigh,
    /// 2 — cloud, low confidence.
    CloudLow,
    /// 3 — clear, low confidence.
    ClearLow,
    /// 4 — clear, high confidence.
    ClearHigh,
    /// 253 — obscured by terrain, unobservable.
    Obscured,
    /// 254 — outside the camera's instantaneous swath.
    Edge,
    /// 255 — structural padding outside the block.
    Fill,
    /// Anything else. Carries the raw byte for round-tripping and anomaly
    /// reporting; never produced by any stage, only passed through from
    /// Stage0 input.
    Other(u8),
}

impl ClassCode {
    /// Decode a raw product byte.
    pub fn from_raw(byte: u8) -> Self {
        match byte {
            0 => ClassCode::Missing,
            1 => ClassCode::CloudHigh,
            2 => ClassCode::CloudLow,
            3 => ClassCode::ClearLow,
            4 => ClassCode::ClearHigh,
            253 => ClassCode::Obscured,
            254 => ClassCode::Edge,
            255 => ClassCode::Fill,
            other => ClassCode::Other(other),
        }
    }

    /// Encode back to the raw product byte.
    pub fn to_raw(self) -> u8 {
        match self {
            ClassCode::Missing => 0,
            ClassCode::CloudHigh => 1,
            ClassCode::CloudLow => 2,
            ClassCode::ClearLow => 3,
            ClassCode::ClearHigh => 4,
            ClassCode::Obscured => 253,
            ClassCode::Edge => 254,
            ClassCode::Fill => 255,
            ClassCode::Other(b) => b,
        }
    }

    /// True for the four valid observation classes {1,2,3,4}.
    pub fn is_valid_observation(self) -> bool {
        matches!(
            self,
            ClassCode::CloudHigh | ClassCode::CloudLow | ClassCode::ClearLow | ClassCode::ClearHigh
        )
    }

    /// True for the unobservable classes {253,254,255}.
    pub fn is_unobservable(self) -> bool {
        matches!(self, ClassCode::Obscured | ClassCode::Edge | ClassCode::Fill)
    }

    /// True for value 0: a gap still awaiting classification.
    pub fn is_gap(self) -> bool {
        matches!(self, ClassCode::Missing)
    }

    /// True for a raw value never appearing in the enumerated product
    /// vocabulary.
    pub fn is_anomalous(self) -> bool {
        matches!(self, ClassCode::Other(_))
    }

    /// Class-order index used by the Stage3 tie-break rule ({4,3,2,1}),
    /// `None` for non-valid-observation classes.
    pub fn tie_break_rank(self) -> Option<u8> {
        match self {
            ClassCode::ClearHigh => Some(0),
            ClassCode::ClearLow => Some(1),
            ClassCode::CloudLow => Some(2),
            ClassCode::CloudHigh => Some(3),
            _ => None,
        }
    }

    /// All four valid observation classes, in ascending product order
    /// (1,2,3,4), used by Stage2's agreement rule.
    pub const VALID_OBSERVATIONS: [ClassCode; 4] = [
        ClassCode::CloudHigh,
        ClassCode::CloudLow,
        ClassCode::ClearLow,
        ClassCode::ClearHigh,
    ];

    /// The 0-based row/column index into a [`crate::confusion::ConfusionMatrix`]
    /// (original classes 1..4 map to rows/cols 0..3; any other class has no
    /// confusion-matrix slot).
    pub fn confusion_index(self) -> Option<usize> {
        match self {
            ClassCode::CloudHigh => Some(0),
            ClassCode::CloudLow => Some(1),
            ClassCode::ClearLow => Some(2),
            ClassCode::ClearHigh => Some(3),
            ClassCode::Missing => Some(4),
            _ => None,
        }
    }
}
