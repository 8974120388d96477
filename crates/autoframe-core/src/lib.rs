//! # AutoFrame Core
//!
//! The layout pipeline, independent of any concrete host or prediction
//! service.
//!
//! ## Components
//!
//! - [`geometry`] - positioning, scaling, clamping and overlap resolution
//! - [`classifier`] - semantic roles, counted names, name cleaning
//! - [`extractor`] - node snapshots, frame descriptors, font pre-pass
//! - [`LayoutApplicator`] - places predicted elements on a cloned frame
//! - [`Orchestrator`] - export, per-frame predict/apply, panel dispatch

pub mod applicator;
pub mod classifier;
pub mod extractor;
pub mod geometry;
pub mod orchestrator;
mod tree;

pub use applicator::{ApplyReport, LayoutApplicator};
pub use classifier::{classify, clean_element_name, Classification, NameCounters};
pub use extractor::{describe_frame, extract_frames, extract_node, load_fonts};
pub use orchestrator::{
    ExportBundle, ExportError, FrameOutcome, FrameStatus, Orchestrator, PipelineSettings,
    RunReport,
};
