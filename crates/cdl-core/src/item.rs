//! Top-level item kinds a CDL document can carry.

use std::fmt;

use crate::{CdlResult, ColorCorrection, ColorDecision};

/// Which record kind the flat top-level collection holds.
///
/// Determined by the top-level tag the source document actually contains:
/// a document with `ColorDecision` elements yields decisions, one with bare
/// `ColorCorrection` elements yields corrections. The container keeps this
/// in agreement with the concrete type of every stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// Top-level items are [`ColorDecision`] groupings.
    ColorDecision,
    /// Top-level items are bare [`ColorCorrection`] records.
    ColorCorrection,
}

/// One top-level item of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum CdlItem {
    /// A decision grouping one or more corrections.
    Decision(ColorDecision),
    /// A bare correction.
    Correction(ColorCorrection),
}

impl CdlItem {
    /// Returns the kind of this item.
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Decision(_) => ItemType::ColorDecision,
            Self::Correction(_) => ItemType::ColorCorrection,
        }
    }

    /// Returns the contained decision, if this item is one.
    pub fn as_decision(&self) -> Option<&ColorDecision> {
        match self {
            Self::Decision(decision) => Some(decision),
            Self::Correction(_) => None,
        }
    }

    /// Returns the contained correction, if this item is one.
    pub fn as_correction(&self) -> Option<&ColorCorrection> {
        match self {
            Self::Decision(_) => None,
            Self::Correction(correction) => Some(correction),
        }
    }

    /// Returns the first correction reachable from this item.
    ///
    /// For a bare correction that is the item itself; for a decision it is
    /// the decision's first owned correction.
    ///
    /// # Errors
    ///
    /// [`crate::CdlError::NoCorrectionAvailable`] for an empty decision.
    pub fn first_correction(&self) -> CdlResult<&ColorCorrection> {
        match self {
            Self::Decision(decision) => decision.first_correction(),
            Self::Correction(correction) => Ok(correction),
        }
    }
}

impl From<ColorDecision> for CdlItem {
    fn from(decision: ColorDecision) -> Self {
        Self::Decision(decision)
    }
}

impl From<ColorCorrection> for CdlItem {
    fn from(correction: ColorCorrection) -> Self {
        Self::Correction(correction)
    }
}

impl fmt::Display for CdlItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decision(decision) => decision.fmt(f),
            Self::Correction(correction) => correction.fmt(f),
        }
    }
}
