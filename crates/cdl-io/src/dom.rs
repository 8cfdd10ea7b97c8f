//! Owned element tree built from quick-xml events.
//!
//! The decision parser needs descendant queries (`getElementsByTagName`
//! style), attribute lookup and direct-text-children concatenation, so the
//! streamed events are assembled into a small tree once per document and
//! walked from there. Input documents are grading sidecars, rarely more than
//! a few kilobytes, so the tree cost is irrelevant.

use quick_xml::Reader;
use quick_xml::events::Event;

use cdl_core::{CdlError, CdlResult};

/// One child of an [`Element`]: a nested element or a run of text.
///
/// Other markup kinds (comments, processing instructions, CDATA) are not
/// represented; text extraction considers direct [`Node::Text`] children
/// only.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// A text run.
    Text(String),
}

/// An element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes as (name, value) pairs, in document order.
    pub attributes: Vec<(String, String)>,
    /// Child nodes, in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Returns the value of an attribute, matched case-sensitively by exact
    /// name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenates the content of the direct text children only.
    ///
    /// Nested elements do not contribute their text.
    pub fn direct_text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let Node::Text(t) = child {
                text.push_str(t);
            }
        }
        text
    }

    /// Returns every descendant element with the given tag, in document
    /// (pre-order) order. The element itself is not considered.
    pub fn descendants<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let Node::Element(el) = child {
                if el.name == tag {
                    found.push(el);
                }
                el.collect_descendants(tag, found);
            }
        }
    }

    /// Returns the first descendant element with the given tag, in document
    /// order, or `None`.
    pub fn first_descendant(&self, tag: &str) -> Option<&Element> {
        for child in &self.children {
            if let Node::Element(el) = child {
                if el.name == tag {
                    return Some(el);
                }
                if let Some(found) = el.first_descendant(tag) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// Parses an XML string into a synthetic document element whose children are
/// the document's top-level nodes.
///
/// # Errors
///
/// [`CdlError::Parse`] when the text is not well-formed XML.
pub fn parse_document(text: &str) -> CdlResult<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut document = Element::default();
    // Open elements, innermost last. End events are balance-checked by
    // quick-xml, so the stack cannot underflow on input that parses.
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(element_from_start(&e));
            }
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&e);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(el)),
                    None => document.children.push(Node::Element(el)),
                }
            }
            Ok(Event::End(_)) => {
                if let Some(el) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(el)),
                        None => document.children.push(Node::Element(el)),
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.decode().unwrap_or_default().into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Text(text));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CdlError::Parse(format!("XML error: {e}"))),
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CdlError::parse("unclosed element at end of document"));
    }

    Ok(document)
}

fn element_from_start(e: &quick_xml::events::BytesStart) -> Element {
    Element {
        name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
        attributes: e
            .attributes()
            .flatten()
            .map(|a| {
                (
                    String::from_utf8_lossy(a.key.as_ref()).to_string(),
                    String::from_utf8_lossy(&a.value).to_string(),
                )
            })
            .collect(),
        children: Vec::new(),
    }
}
