//! The four-stage RCCM repair pipeline and its controller: ingest, flag,
//! cross-camera fill, neighbourhood fill.

pub mod controller;
pub mod stage0;
pub mod stage1;
pub mod stage2;
pub mod stage3;

pub use controller::{run, persist, NullObserver, OutputOptions, PipelineObserver, PipelineOptions, PipelineOutput};
pub use stage0::Stage0Output;
pub use stage1::Stage1Output;
pub use stage2::{Stage2Options, Stage2Output};
pub use stage3::{Stage3Options, Stage3Output};
