//! Minimal built-in EDL engine.
//!
//! Splits an edit decision list into events and collects each event's `*`
//! comment lines, which is all the CDL extractor needs. Timing fields,
//! transitions and the timebase are ignored entirely; pipelines that need
//! real timeline semantics should install their own [`EdlEngine`].

use cdl_core::CdlResult;

use crate::edl::{EdlEngine, EdlEvent};

/// Line-oriented EDL event splitter.
///
/// An event begins at a statement line whose first token is an event number
/// (`001  clipname V C ...`); every following `*` comment line belongs to
/// that event until the next one starts. Header lines (`TITLE:`, `FCM:`)
/// and anything before the first event are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSplitter;

fn is_event_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
}

impl EdlEngine for EventSplitter {
    fn parse(&self, _timebase: &str, text: &str) -> CdlResult<Vec<EdlEvent>> {
        let mut events = Vec::new();
        let mut current: Option<EdlEvent> = None;
        for raw in text.lines() {
            let line = raw.trim();
            if is_event_line(line) {
                if let Some(event) = current.take() {
                    events.push(event);
                }
                current = Some(EdlEvent::default());
            } else if line.starts_with('*') {
                if let Some(event) = current.as_mut() {
                    event.push_comment(line);
                }
            }
        }
        if let Some(event) = current {
            events.push(event);
        }
        Ok(events)
    }
}
