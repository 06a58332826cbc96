//! The single error type returned at stage and I/O boundaries.

/// Exhaustive error taxonomy shared by every crate in the workspace.
///
/// Per-pixel decisions never produce an error; every variant here
/// originates at a stage or I/O boundary.
#[derive(Debug, thiserror::Error)]
pub enum RccmError {
    /// Path, orbit or block out of range, or inconsistent (orbit does not
    /// belong to path).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No camera file found for this orbit.
    #[error("missing input: {0}")]
    Missing(String),

    /// Fewer than 9 camera files found for this orbit.
    #[error("incomplete camera set ({found} of 9): {detail}")]
    Incomplete { found: usize, detail: String },

    /// More than 9 camera files matched this orbit.
    #[error("ambiguous camera set ({found} candidates): {detail}")]
    Ambiguous { found: usize, detail: String },

    /// A located file exists but cannot be opened or read.
    #[error("unreadable input: {0}")]
    Unreadable(String),

    /// Underlying tile I/O or HDF decoding problem.
    #[error("reader failure: {0}")]
    ReaderFailure(String),

    /// Plane dimensions deviate from the fixed 512x128 layout.
    #[error("shape mismatch: expected {expected_samples}x{expected_lines}, got {got_samples}x{got_lines} ({detail})")]
    ShapeMismatch {
        expected_samples: usize,
        expected_lines: usize,
        got_samples: usize,
        got_lines: usize,
        detail: String,
    },

    /// Output directory unwritable or write truncated.
    #[error("sink failure: {0}")]
    SinkFailure(String),

    /// Stage 3 left residual gaps. Non-fatal; carried as a warning alongside
    /// a successful result, never returned as `Err` by the pipeline itself,
    /// but exposed here so sinks/CLI can report it uniformly.
    #[error("stage 3 did not converge, {residual} residual gap(s) remain")]
    IterationNotConverged { residual: u32 },

    /// Orbit sweep found no orbit with both radiance and RCCM complete.
    #[error("empty intersection: no orbit has both radiance and RCCM inputs")]
    EmptyIntersection,
}

impl RccmError {
    /// Distinct process exit code per variant, for the CLI boundary.
    pub fn exit_code(&self) -> i32 {
        match self {
            RccmError::InvalidArgument(_) => 2,
            RccmError::Missing(_) | RccmError::Incomplete { .. } | RccmError::Ambiguous { .. } => 3,
            RccmError::Unreadable(_) | RccmError::ReaderFailure(_) => 4,
            RccmError::ShapeMismatch { .. } => 5,
            RccmError::SinkFailure(_) => 6,
            RccmError::IterationNotConverged { .. } => 0,
            RccmError::EmptyIntersection => 7,
        }
    }
}
