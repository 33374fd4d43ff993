//! # sourcery-core
//!
//! The directive-processing pipeline behind the sourcery preprocessor.
//!
//! A source file is loaded whole into an arena-owned, NUL-terminated buffer,
//! split into a trunk/branch line list, classified in one pass (which line is
//! a `#!` directive, and of which kind), then executed in a second pass that
//! dispatches each directive: create a directory, create a file from a literal
//! or multiline payload, or run a command through the host shell. Directive
//! lines are consumed by the pipeline; everything else is plain content.
//!
//! Memory discipline is the load-bearing design decision: every transient
//! allocation lives in the [`arena`], files are processed under one top-level
//! checkpoint each, and every directive runs under a nested checkpoint, so
//! nothing is individually freed and nothing outlives its scope. See the
//! module docs of [`arena`], [`list`], and [`executor`] for the details.

pub mod arena;
pub mod directive;
pub mod error;
pub mod executor;
pub mod list;
pub mod platform;
pub mod processor;
pub mod report;
pub mod scan;
pub mod source;

pub use arena::{Arena, Block, Checkpoint};
pub use directive::DirectiveKind;
pub use error::ProcessError;
pub use processor::{inspect_source_file, process_source_file, DirectiveListing};
pub use report::{FileReport, Outcome};
pub use scan::LineEnding;
