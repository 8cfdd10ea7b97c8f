//! CDL extraction from EDL comment lines.
//!
//! Structural EDL parsing (events, timing) is delegated to an [`EdlEngine`];
//! this module only turns each event's comment block into a
//! [`ColorCorrection`]. Three fixed patterns are matched per line,
//! independently and non-exclusively, anchored at line start:
//!
//! ```text
//! * ASC_SOP (sR sG sB)(oR oG oB)(pR pG pB)
//! * ASC_SAT 0.75
//! * FROM CLIP NAME:  dra_001_0002_v0003
//! ```
//!
//! The ASC_SOP field order in the input is slope, offset, power, matching
//! the printed SOP grouping.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use cdl_core::value::num_triple;
use cdl_core::{CdlItem, CdlResult, ColorCorrection};

/// Structural EDL parser consumed as an optional capability.
///
/// The container resolves an engine once at construction; when none is
/// available the EDL flavour yields zero items instead of failing. The
/// built-in [`crate::events::EventSplitter`] (feature `edl`) is the default
/// implementation; callers can install their own with
/// [`crate::Cdl::with_engine`].
pub trait EdlEngine: Send + Sync {
    /// Parses EDL text into its events.
    ///
    /// `timebase` is the frame-rate context ("24", "25", ...); engines that
    /// ignore timing may disregard it.
    fn parse(&self, timebase: &str, text: &str) -> CdlResult<Vec<EdlEvent>>;
}

/// One EDL event as seen by the CDL extractor: its comment lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdlEvent {
    comments: Vec<String>,
}

impl EdlEvent {
    /// Creates an event from its comment lines.
    pub fn new(comments: Vec<String>) -> Self {
        Self { comments }
    }

    /// The event's comment lines, in document order.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Appends one comment line.
    pub fn push_comment(&mut self, line: impl Into<String>) {
        self.comments.push(line.into());
    }
}

/// One comment pattern plus the field assignment it drives.
struct CommentRule {
    pattern: Regex,
    apply: fn(&mut ColorCorrection, &Captures),
}

static COMMENT_RULES: LazyLock<[CommentRule; 3]> = LazyLock::new(|| {
    // decimal-point floats, optionally negative
    let f = r"(-?\d+\.\d+)";
    let sop = format!(r"^\*\s*ASC_SOP \({f} {f} {f}\)\({f} {f} {f}\)\({f} {f} {f}\)");
    [
        CommentRule {
            pattern: Regex::new(&sop).expect("ASC_SOP pattern"),
            apply: apply_sop,
        },
        CommentRule {
            pattern: Regex::new(&format!(r"^\*\s*ASC_SAT {f}")).expect("ASC_SAT pattern"),
            apply: apply_sat,
        },
        CommentRule {
            pattern: Regex::new(r"^\*\s*FROM CLIP NAME:\s+(\w+)").expect("clip name pattern"),
            apply: apply_clip_name,
        },
    ]
});

fn float_group(caps: &Captures, index: usize, fallback: f32) -> f32 {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(fallback)
}

fn apply_sop(correction: &mut ColorCorrection, caps: &Captures) {
    correction.slope = num_triple([
        float_group(caps, 1, 1.0),
        float_group(caps, 2, 1.0),
        float_group(caps, 3, 1.0),
    ]);
    correction.offset = num_triple([
        float_group(caps, 4, 0.0),
        float_group(caps, 5, 0.0),
        float_group(caps, 6, 0.0),
    ]);
    correction.power = num_triple([
        float_group(caps, 7, 1.0),
        float_group(caps, 8, 1.0),
        float_group(caps, 9, 1.0),
    ]);
}

fn apply_sat(correction: &mut ColorCorrection, caps: &Captures) {
    correction.saturation = float_group(caps, 1, 1.0);
}

fn apply_clip_name(correction: &mut ColorCorrection, caps: &Captures) {
    if let Some(name) = caps.get(1) {
        correction.id = Some(name.as_str().to_string());
    }
}

/// Builds one [`ColorCorrection`] from an event's comment lines.
///
/// Every rule is tried against every line; a line may feed zero or several
/// rules, and later matches overwrite earlier ones. Unmatched fields keep
/// their defaults, so a record is produced even for an event with no CDL
/// comments at all.
pub fn correction_from_comments(lines: &[String], source_file: Option<&str>) -> ColorCorrection {
    let mut correction = ColorCorrection::new();
    correction.source_file = source_file.map(str::to_string);
    for line in lines {
        for rule in COMMENT_RULES.iter() {
            if let Some(caps) = rule.pattern.captures(line) {
                (rule.apply)(&mut correction, &caps);
            }
        }
    }
    correction
}

/// Parses EDL text into one correction per event.
///
/// Without an engine this yields zero items rather than an error; callers
/// can check `Cdl::edls_enabled` beforehand.
pub(crate) fn parse_edl(
    engine: Option<&dyn EdlEngine>,
    timebase: &str,
    text: &str,
    source_file: Option<&str>,
) -> CdlResult<Vec<CdlItem>> {
    let Some(engine) = engine else {
        debug!("EDL flavour requested but no EDL engine is available");
        return Ok(Vec::new());
    };
    let events = engine.parse(timebase, text)?;
    Ok(events
        .iter()
        .map(|event| CdlItem::Correction(correction_from_comments(event.comments(), source_file)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdl_core::value::num_triple;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_comment_block() {
        let comments = lines(&[
            "*ASC_SOP (0.9491 0.9552 0.9853)(0.1494 0.1645 0.2036)(1.5717 1.5728 1.5539)",
            "*ASC_SAT 0.75",
            "*FROM CLIP NAME:  dra_001_0002_v0003",
        ]);
        let cc = correction_from_comments(&comments, None);
        assert_eq!(cc.slope, num_triple([0.9491, 0.9552, 0.9853]));
        assert_eq!(cc.offset, num_triple([0.1494, 0.1645, 0.2036]));
        assert_eq!(cc.power, num_triple([1.5717, 1.5728, 1.5539]));
        assert!((cc.saturation - 0.75).abs() < 1e-6);
        assert_eq!(cc.id.as_deref(), Some("dra_001_0002_v0003"));
    }

    #[test]
    fn whitespace_after_star_is_optional() {
        let cc = correction_from_comments(&lines(&["* ASC_SAT 0.5"]), None);
        assert!((cc.saturation - 0.5).abs() < 1e-6);
        let cc = correction_from_comments(&lines(&["*ASC_SAT 0.5"]), None);
        assert!((cc.saturation - 0.5).abs() < 1e-6);
    }

    #[test]
    fn match_is_anchored_but_trailing_content_is_ignored() {
        // trailing junk after the match does not matter
        let cc = correction_from_comments(&lines(&["*ASC_SAT 0.5 extra stuff"]), None);
        assert!((cc.saturation - 0.5).abs() < 1e-6);
        // a comment that only mentions the keyword mid-line does not match
        let cc = correction_from_comments(&lines(&["* note: ASC_SAT 0.5"]), None);
        assert!((cc.saturation - 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_values_parse() {
        let comments = lines(&[
            "*ASC_SOP (1.0000 1.0000 1.0000)(-0.0500 -0.0100 0.0200)(1.0000 1.0000 1.0000)",
        ]);
        let cc = correction_from_comments(&comments, None);
        assert_eq!(cc.offset, num_triple([-0.05, -0.01, 0.02]));
    }

    #[test]
    fn event_without_cdl_comments_yields_identity() {
        let cc = correction_from_comments(&lines(&["* SOURCE FILE: A001_C002"]), None);
        assert!(cc.is_identity());
        assert!(cc.id.is_none());
    }

    #[test]
    fn missing_engine_degrades_to_zero_items() {
        let items = parse_edl(None, "24", "001 irrelevant", None).unwrap();
        assert!(items.is_empty());
    }

    struct FixedEngine(Vec<EdlEvent>);

    impl EdlEngine for FixedEngine {
        fn parse(&self, _timebase: &str, _text: &str) -> CdlResult<Vec<EdlEvent>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn one_correction_per_event_in_event_order() {
        let engine = FixedEngine(vec![
            EdlEvent::new(lines(&["*ASC_SAT 0.10"])),
            EdlEvent::new(lines(&["*ASC_SAT 0.20"])),
            EdlEvent::new(lines(&[])),
        ]);
        let items = parse_edl(Some(&engine), "24", "", Some("cut.edl")).unwrap();
        assert_eq!(items.len(), 3);
        let sats: Vec<f32> = items
            .iter()
            .map(|i| i.as_correction().unwrap().saturation)
            .collect();
        assert!((sats[0] - 0.10).abs() < 1e-6);
        assert!((sats[1] - 0.20).abs() < 1e-6);
        assert!((sats[2] - 1.0).abs() < 1e-6);
        assert!(items
            .iter()
            .all(|i| i.as_correction().unwrap().source_file.as_deref() == Some("cut.edl")));
    }
}
