//! The top-level CDL container and flavour dispatch.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use cdl_core::{CdlError, CdlItem, CdlResult, ItemType};

use crate::edl::{self, EdlEngine};
use crate::xml;

/// The input encoding a container parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavour {
    /// XML decision lists and correction collections (`.cdl`/`.ccc`/`.cc`).
    #[default]
    Xml,
    /// Edit decision lists with CDL comment lines per event.
    Edl,
}

impl FromStr for Flavour {
    type Err = CdlError;

    /// Parses a flavour label.
    ///
    /// # Errors
    ///
    /// [`CdlError::UnknownFlavour`] for anything but the known labels;
    /// an unrecognized flavour is a configuration error, not a parse
    /// fallback.
    fn from_str(s: &str) -> CdlResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" | "xml_cdl" | "cdl" | "ccc" | "cc" => Ok(Self::Xml),
            "edl" | "edl_cdl" => Ok(Self::Edl),
            other => Err(CdlError::UnknownFlavour(other.to_string())),
        }
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => f.write_str("xml"),
            Self::Edl => f.write_str("edl"),
        }
    }
}

// Resolved once for the process; engine availability does not change at
// runtime.
static DEFAULT_ENGINE: OnceLock<Option<Arc<dyn EdlEngine>>> = OnceLock::new();

#[cfg(feature = "edl")]
fn build_default_engine() -> Option<Arc<dyn EdlEngine>> {
    Some(Arc::new(crate::events::EventSplitter))
}

#[cfg(not(feature = "edl"))]
fn build_default_engine() -> Option<Arc<dyn EdlEngine>> {
    None
}

fn default_engine() -> Option<Arc<dyn EdlEngine>> {
    DEFAULT_ENGINE.get_or_init(build_default_engine).clone()
}

/// An ordered collection of top-level color items parsed from one or more
/// documents of a fixed flavour.
///
/// The container is append-only while parsing and indexable afterwards.
/// `item_type` records which record kind the collection holds; it always
/// agrees with the concrete type of the stored items.
///
/// # Example
///
/// ```rust
/// use cdl_io::{Cdl, Flavour};
///
/// let mut cdl = Cdl::new(Flavour::Xml);
/// cdl.load_str("<ColorCorrection><SOPNode>\
///     <Slope>1.0 1.0 1.0</Slope><Offset>0.0 0.0 0.0</Offset>\
///     <Power>1.0 1.0 1.0</Power></SOPNode>\
///     <SatNode><Saturation>1.0</Saturation></SatNode>\
///     </ColorCorrection>").unwrap();
/// assert_eq!(cdl.len(), 1);
/// ```
#[derive(Clone)]
pub struct Cdl {
    flavour: Flavour,
    timebase: String,
    source_file: Option<String>,
    item_type: ItemType,
    items: Vec<CdlItem>,
    engine: Option<Arc<dyn EdlEngine>>,
}

impl Cdl {
    /// Creates an empty container for the given flavour.
    ///
    /// The default EDL engine (the built-in event splitter when the `edl`
    /// feature is enabled, none otherwise) is resolved here and cached for
    /// the life of the container.
    pub fn new(flavour: Flavour) -> Self {
        Self {
            flavour,
            timebase: "24".to_string(),
            source_file: None,
            item_type: ItemType::ColorDecision,
            items: Vec::new(),
            engine: default_engine(),
        }
    }

    /// Sets the timebase handed to the EDL engine (default `"24"`).
    pub fn with_timebase(mut self, timebase: impl Into<String>) -> Self {
        self.timebase = timebase.into();
        self
    }

    /// Installs an EDL engine, replacing the default.
    pub fn with_engine(mut self, engine: Arc<dyn EdlEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Removes the EDL engine; the EDL flavour will yield zero items.
    pub fn without_engine(mut self) -> Self {
        self.engine = None;
        self
    }

    /// The configured flavour.
    pub fn flavour(&self) -> Flavour {
        self.flavour
    }

    /// The configured EDL timebase.
    pub fn timebase(&self) -> &str {
        &self.timebase
    }

    /// Basename of the last loaded file, if any.
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    /// Which record kind the top-level collection holds.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// The parsed top-level items, in document order.
    pub fn items(&self) -> &[CdlItem] {
        &self.items
    }

    /// Whether an EDL engine is available to this container.
    pub fn edls_enabled(&self) -> bool {
        self.engine.is_some()
    }

    /// Loads a CDL document from a file.
    ///
    /// The file's basename is recorded and propagated to every parsed
    /// correction as its `source_file`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> CdlResult<()> {
        let path = path.as_ref();
        self.source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let mut file = File::open(path)?;
        self.read(&mut file)
    }

    /// Loads a CDL document from a reader.
    pub fn read<R: Read>(&mut self, reader: &mut R) -> CdlResult<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.load_str(&text)
    }

    /// Loads a CDL document from a string; the common entry point that
    /// `load` and `read` converge on.
    ///
    /// # Errors
    ///
    /// [`CdlError::EmptyInput`] for empty text; otherwise whatever the
    /// flavour's parser reports.
    pub fn load_str(&mut self, text: &str) -> CdlResult<()> {
        if text.is_empty() {
            return Err(CdlError::EmptyInput);
        }
        match self.flavour {
            Flavour::Xml => {
                let (item_type, items) = xml::parse_xml(text, self.source_file.as_deref())?;
                self.item_type = item_type;
                self.items.extend(items);
            }
            Flavour::Edl => {
                self.item_type = ItemType::ColorCorrection;
                let items = edl::parse_edl(
                    self.engine.as_deref(),
                    &self.timebase,
                    text,
                    self.source_file.as_deref(),
                )?;
                self.items.extend(items);
            }
        }
        Ok(())
    }

    /// Appends an item to the collection.
    ///
    /// Used by the parsers; callers appending directly are responsible for
    /// keeping the item kind consistent with `item_type`.
    pub fn append(&mut self, item: CdlItem) {
        self.items.push(item);
    }

    /// Returns the number of top-level items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been parsed into the container.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an item by index.
    pub fn get(&self, index: usize) -> Option<&CdlItem> {
        self.items.get(index)
    }

    /// Iterates over the items in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, CdlItem> {
        self.items.iter()
    }

    /// Returns the first item.
    ///
    /// Most real documents contain exactly one top-level item, making this
    /// the common access pattern.
    ///
    /// # Errors
    ///
    /// [`CdlError::NoItemAvailable`] when the collection is empty.
    pub fn first_item(&self) -> CdlResult<&CdlItem> {
        self.items.first().ok_or(CdlError::NoItemAvailable)
    }
}

impl Default for Cdl {
    fn default() -> Self {
        Self::new(Flavour::default())
    }
}

impl Index<usize> for Cdl {
    type Output = CdlItem;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl fmt::Display for Cdl {
    /// One item per line, in collection order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Cdl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cdl")
            .field("flavour", &self.flavour)
            .field("timebase", &self.timebase)
            .field("source_file", &self.source_file)
            .field("item_type", &self.item_type)
            .field("items", &self.items)
            .field("edls_enabled", &self.edls_enabled())
            .finish()
    }
}
