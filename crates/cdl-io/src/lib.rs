//! # cdl-io
//!
//! Document parsing for ASC Color Decision List grading metadata.
//!
//! Two textual encodings converge on the same [`Cdl`] container:
//!
//! - **XML** (`.cdl` / `.ccc` / `.cc`): `ColorDecision` or `ColorCorrection`
//!   elements with `SOPNode/{Slope,Offset,Power}` triples and
//!   `SatNode/Saturation` scalars ([`xml`] module).
//! - **EDL**: comment lines (`* ASC_SOP ...`, `* ASC_SAT ...`,
//!   `* FROM CLIP NAME: ...`) embedded per event in an edit decision list
//!   ([`edl`] module). Structural EDL parsing is delegated to an
//!   [`EdlEngine`]; a minimal built-in event splitter is provided behind the
//!   default-on `edl` feature.
//!
//! # Example
//!
//! ```rust
//! use cdl_io::{Cdl, Flavour};
//!
//! let xml = r#"<ColorCorrection id="cc01">
//!   <SOPNode>
//!     <Slope>1.1 1.0 0.9</Slope>
//!     <Offset>0.0 0.0 0.0</Offset>
//!     <Power>1.0 1.0 1.0</Power>
//!   </SOPNode>
//!   <SatNode><Saturation>1.2</Saturation></SatNode>
//! </ColorCorrection>"#;
//!
//! let mut cdl = Cdl::new(Flavour::Xml);
//! cdl.load_str(xml).unwrap();
//! let cc = cdl.first_item().unwrap().first_correction().unwrap();
//! assert_eq!(cc.id.as_deref(), Some("cc01"));
//! ```
//!
//! # Error policy
//!
//! Structural problems (empty input, malformed XML, no color items) are
//! fatal. Problems inside one record (missing SOP node, bad numbers) are
//! contained at the record boundary, logged via `tracing`, and yield a
//! partially-default record instead of failing the parse.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cdl;
pub mod dom;
pub mod edl;
#[cfg(feature = "edl")]
pub mod events;
pub mod xml;

pub use cdl::{Cdl, Flavour};
pub use edl::{EdlEngine, EdlEvent, correction_from_comments};
#[cfg(feature = "edl")]
pub use events::EventSplitter;
