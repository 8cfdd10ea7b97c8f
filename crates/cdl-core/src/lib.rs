//! # cdl-core
//!
//! Core types for ASC Color Decision List (CDL) grading metadata.
//!
//! This crate provides the data model shared by the CDL-RS parsers:
//!
//! - [`ColorCorrection`] - one Slope/Offset/Power + Saturation record, the
//!   atomic unit of grading metadata
//! - [`ColorDecision`] - a named grouping of one or more corrections
//! - [`CdlItem`] / [`ItemType`] - the two record kinds a document can carry
//!   at its top level
//! - [`Value`] / [`Triple`] - numeric tokens extracted from document text,
//!   with field-level tolerance for malformed input
//!
//! ## Design Philosophy
//!
//! Grading metadata coming out of post-production pipelines is frequently
//! hand-edited and mildly malformed. The model therefore favors **best-effort
//! construction**: a record is always produced, individual fields that fail
//! to extract keep their identity defaults, and a non-numeric token inside an
//! otherwise valid tuple is retained verbatim as text rather than discarded.
//! Failures are reported through [`tracing`] rather than aborting the parse.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of CDL-RS and has no internal dependencies.
//! The parsers live in `cdl-io`:
//!
//! ```text
//! cdl-core (this crate)
//!    ^
//!    |
//!    +-- cdl-io  (XML + EDL document parsing)
//!    +-- cdl-cli (inspection binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod correction;
pub mod decision;
pub mod error;
pub mod item;
pub mod value;

// Re-exports for convenience
pub use correction::ColorCorrection;
pub use decision::ColorDecision;
pub use error::{CdlError, CdlResult};
pub use item::{CdlItem, ItemType};
pub use value::{Triple, Value};
