//! XML decision-list parsing.
//!
//! Walks a parsed document tree and builds one record per `ColorDecision`
//! (or, for collection-style documents, per bare `ColorCorrection`) element.
//! Record construction is best-effort: a failure while extracting one
//! correction's SOP/SAT fields is logged at error severity and leaves the
//! remaining fields at their defaults, it never aborts the document.

use tracing::{debug, error};

use cdl_core::value::{float_from_text, triple_from_text};
use cdl_core::{CdlError, CdlItem, CdlResult, ColorCorrection, ColorDecision, ItemType, Triple};

use crate::dom::{self, Element};

/// Extracts a channel triple from an element's direct text content.
pub fn triple_from_element(el: &Element) -> CdlResult<Triple> {
    triple_from_text(&el.direct_text())
}

/// Extracts a single float from an element's direct text content.
pub fn float_from_element(el: &Element) -> CdlResult<f32> {
    float_from_text(&el.direct_text())
}

/// Parses an XML document into top-level items.
///
/// The item kind is decided by which tag the document actually contains:
/// `ColorDecision` elements win, otherwise bare `ColorCorrection` elements.
///
/// # Errors
///
/// [`CdlError::Parse`] for malformed XML and [`CdlError::NoColorItems`]
/// when neither tag is present.
pub fn parse_xml(text: &str, source_file: Option<&str>) -> CdlResult<(ItemType, Vec<CdlItem>)> {
    let document = dom::parse_document(text)?;

    let decisions = document.descendants("ColorDecision");
    if !decisions.is_empty() {
        let items = decisions
            .into_iter()
            .map(|node| CdlItem::Decision(decision_from_element(node, source_file)))
            .collect();
        return Ok((ItemType::ColorDecision, items));
    }

    let corrections = document.descendants("ColorCorrection");
    if !corrections.is_empty() {
        let items = corrections
            .into_iter()
            .map(|node| CdlItem::Correction(correction_from_element(node, source_file)))
            .collect();
        return Ok((ItemType::ColorCorrection, items));
    }

    Err(CdlError::NoColorItems)
}

/// Builds a [`ColorDecision`] from its element.
///
/// A missing id attribute is a normal condition, reported at debug level
/// only. All descendant `ColorCorrection` elements are appended in document
/// order.
pub fn decision_from_element(el: &Element, source_file: Option<&str>) -> ColorDecision {
    let mut decision = ColorDecision::new();
    match el.attribute("id") {
        Some(id) => {
            debug!(id, "id for color decision set");
            decision.id = Some(id.to_string());
        }
        None => debug!("no id attribute set for color decision"),
    }
    for node in el.descendants("ColorCorrection") {
        decision.append(correction_from_element(node, source_file));
    }
    decision
}

/// Builds a [`ColorCorrection`] from its element, never failing.
///
/// Extraction runs in a fixed sequence (Slope, Offset, Power, Saturation,
/// id attribute); the first failure stops it, is logged with its detail,
/// and the record keeps whatever was set up to that point plus defaults.
pub fn correction_from_element(el: &Element, source_file: Option<&str>) -> ColorCorrection {
    let mut correction = ColorCorrection::new();
    correction.source_file = source_file.map(str::to_string);
    if let Err(err) = fill_correction(&mut correction, el) {
        error!(error = %err, detail = ?err, "unable to process color correction");
    }
    correction
}

fn missing(tag: &str) -> CdlError {
    CdlError::Parse(format!("missing {tag} element"))
}

fn fill_correction(correction: &mut ColorCorrection, el: &Element) -> CdlResult<()> {
    let sop = el.first_descendant("SOPNode").ok_or_else(|| missing("SOPNode"))?;
    let slope = sop.first_descendant("Slope").ok_or_else(|| missing("Slope"))?;
    let offset = sop.first_descendant("Offset").ok_or_else(|| missing("Offset"))?;
    let power = sop.first_descendant("Power").ok_or_else(|| missing("Power"))?;
    correction.slope = triple_from_element(slope)?;
    correction.offset = triple_from_element(offset)?;
    correction.power = triple_from_element(power)?;
    let sat = el.first_descendant("SatNode").ok_or_else(|| missing("SatNode"))?;
    let saturation = sat
        .first_descendant("Saturation")
        .ok_or_else(|| missing("Saturation"))?;
    correction.saturation = float_from_element(saturation)?;
    correction.id = el.attribute("id").map(str::to_string);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdl_core::Value;
    use cdl_core::value::num_triple;

    const CC_SAMPLE: &str = r#"<ColorCorrection id="cc0001">
  <SOPNode>
    <Slope>0.9491 0.9552 0.9853</Slope>
    <Offset>0.1494 0.1645 0.2036</Offset>
    <Power>1.5717 1.5728 1.5539</Power>
  </SOPNode>
  <SatNode>
    <Saturation>0.75</Saturation>
  </SatNode>
</ColorCorrection>"#;

    const CDL_SAMPLE: &str = r#"<ColorDecisionList xmlns="urn:ASC:CDL:v1.01">
  <ColorDecision id="cd01">
    <ColorCorrection id="shot001">
      <SOPNode>
        <Slope>1.1 1.0 0.9</Slope>
        <Offset>0.0 0.01 0.0</Offset>
        <Power>1.0 1.0 1.0</Power>
      </SOPNode>
      <SatNode>
        <Saturation>1.2</Saturation>
      </SatNode>
    </ColorCorrection>
    <ColorCorrection id="shot002">
      <SOPNode>
        <Slope>0.9 0.7 0.6</Slope>
        <Offset>0.1 0.1 0.1</Offset>
        <Power>0.9 0.9 0.9</Power>
      </SOPNode>
      <SatNode>
        <Saturation>0.7</Saturation>
      </SatNode>
    </ColorCorrection>
  </ColorDecision>
</ColorDecisionList>"#;

    fn corrections_of(items: &[CdlItem]) -> Vec<&ColorCorrection> {
        items
            .iter()
            .filter_map(CdlItem::as_correction)
            .collect()
    }

    #[test]
    fn slope_textual_roundtrip() {
        let (item_type, items) = parse_xml(CC_SAMPLE, None).unwrap();
        assert_eq!(item_type, ItemType::ColorCorrection);
        let cc = corrections_of(&items)[0];
        assert_eq!(cc.slope, num_triple([0.9491, 0.9552, 0.9853]));
        assert_eq!(cc.offset, num_triple([0.1494, 0.1645, 0.2036]));
        assert_eq!(cc.power, num_triple([1.5717, 1.5728, 1.5539]));
        assert!((cc.saturation - 0.75).abs() < 1e-6);
        assert_eq!(cc.id.as_deref(), Some("cc0001"));
    }

    #[test]
    fn decision_document_groups_corrections() {
        let (item_type, items) = parse_xml(CDL_SAMPLE, Some("grades.cdl")).unwrap();
        assert_eq!(item_type, ItemType::ColorDecision);
        assert_eq!(items.len(), 1);
        let decision = items[0].as_decision().unwrap();
        assert_eq!(decision.id.as_deref(), Some("cd01"));
        assert_eq!(decision.len(), 2);
        assert_eq!(decision[0].id.as_deref(), Some("shot001"));
        assert_eq!(decision[1].id.as_deref(), Some("shot002"));
        assert_eq!(decision[0].source_file.as_deref(), Some("grades.cdl"));
        assert_eq!(decision[1].slope, num_triple([0.9, 0.7, 0.6]));
    }

    #[test]
    fn decision_without_id_is_normal() {
        let xml = "<ColorDecision></ColorDecision>";
        let (_, items) = parse_xml(xml, None).unwrap();
        let decision = items[0].as_decision().unwrap();
        assert!(decision.id.is_none());
        assert!(decision.is_empty());
    }

    #[test]
    fn missing_sop_and_sat_yields_defaults() {
        let xml = r#"<ColorCorrection id="bare"></ColorCorrection>"#;
        let (_, items) = parse_xml(xml, None).unwrap();
        let cc = corrections_of(&items)[0];
        assert_eq!(cc.slope, num_triple([1.0, 1.0, 1.0]));
        assert_eq!(cc.power, num_triple([1.0, 1.0, 1.0]));
        assert_eq!(cc.offset, num_triple([0.0, 0.0, 0.0]));
        assert_eq!(cc.saturation, 1.0);
        // extraction stops before the id attribute is reached
        assert!(cc.id.is_none());
    }

    #[test]
    fn failure_keeps_fields_set_before_it() {
        // Saturation is missing: SOP fields survive, id is never reached.
        let xml = r#"<ColorCorrection id="half">
  <SOPNode>
    <Slope>2.0 2.0 2.0</Slope>
    <Offset>0.1 0.1 0.1</Offset>
    <Power>1.1 1.1 1.1</Power>
  </SOPNode>
</ColorCorrection>"#;
        let (_, items) = parse_xml(xml, None).unwrap();
        let cc = corrections_of(&items)[0];
        assert_eq!(cc.slope, num_triple([2.0, 2.0, 2.0]));
        assert_eq!(cc.offset, num_triple([0.1, 0.1, 0.1]));
        assert_eq!(cc.power, num_triple([1.1, 1.1, 1.1]));
        assert_eq!(cc.saturation, 1.0);
        assert!(cc.id.is_none());
    }

    #[test]
    fn non_numeric_token_is_retained_as_text() {
        let xml = r#"<ColorCorrection>
  <SOPNode>
    <Slope>1.2 foo 0.9</Slope>
    <Offset>0.0 0.0 0.0</Offset>
    <Power>1.0 1.0 1.0</Power>
  </SOPNode>
  <SatNode><Saturation>1.0</Saturation></SatNode>
</ColorCorrection>"#;
        let (_, items) = parse_xml(xml, None).unwrap();
        let cc = corrections_of(&items)[0];
        assert_eq!(cc.slope[0], Value::Num(1.2));
        assert_eq!(cc.slope[1], Value::Text("foo".to_string()));
        assert_eq!(cc.slope[2], Value::Num(0.9));
        // a token-level failure does not stop the rest of the record
        assert_eq!(cc.power, num_triple([1.0, 1.0, 1.0]));
    }

    #[test]
    fn wrong_arity_is_contained_at_record_level() {
        let xml = r#"<ColorCorrection>
  <SOPNode>
    <Slope>1.2 0.9</Slope>
    <Offset>0.1 0.1 0.1</Offset>
    <Power>1.0 1.0 1.0</Power>
  </SOPNode>
  <SatNode><Saturation>1.0</Saturation></SatNode>
</ColorCorrection>"#;
        let (_, items) = parse_xml(xml, None).unwrap();
        let cc = corrections_of(&items)[0];
        // slope failed first, so the whole record stays at defaults
        assert!(cc.is_identity());
    }

    #[test]
    fn id_attribute_is_case_sensitive() {
        let xml = r#"<ColorCorrection ID="nope">
  <SOPNode>
    <Slope>1.0 1.0 1.0</Slope>
    <Offset>0.0 0.0 0.0</Offset>
    <Power>1.0 1.0 1.0</Power>
  </SOPNode>
  <SatNode><Saturation>1.0</Saturation></SatNode>
</ColorCorrection>"#;
        let (_, items) = parse_xml(xml, None).unwrap();
        assert!(corrections_of(&items)[0].id.is_none());
    }

    #[test]
    fn document_without_color_items_fails() {
        let err = parse_xml("<Timeline><Clip/></Timeline>", None).unwrap_err();
        assert!(matches!(err, CdlError::NoColorItems));
    }

    #[test]
    fn decisions_win_over_bare_corrections() {
        // when both tags exist, corrections are owned by their decisions
        let (item_type, items) = parse_xml(CDL_SAMPLE, None).unwrap();
        assert_eq!(item_type, ItemType::ColorDecision);
        assert!(items.iter().all(|i| i.as_decision().is_some()));
    }
}
