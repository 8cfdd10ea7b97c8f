//! The atomic grading record: Slope/Offset/Power + Saturation.

use std::fmt;

use serde::Serialize;

use crate::CdlResult;
use crate::value::{Triple, num_triple};

/// A single ASC color correction.
///
/// Carries the SOP triple set (slope, offset, power), a saturation scalar,
/// an optional identifier, and the name of the originating document.
/// Defaults are the identity correction.
///
/// Normal use is construct-then-read: the parsers populate a record once and
/// callers only inspect it afterwards.
///
/// # Example
///
/// ```rust
/// use cdl_core::ColorCorrection;
///
/// let cc = ColorCorrection::new()
///     .with_slope([1.1, 1.0, 0.9])
///     .with_saturation(0.75)
///     .with_id("shot001");
/// assert_eq!(cc.saturation, 0.75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorCorrection {
    /// Slope (multiply) per channel [R, G, B].
    pub slope: Triple,
    /// Power (gamma) per channel [R, G, B].
    pub power: Triple,
    /// Offset (add) per channel [R, G, B].
    pub offset: Triple,
    /// Saturation adjustment (1.0 = no change).
    pub saturation: f32,
    /// Identifier, from the `id` attribute or a clip-name comment.
    pub id: Option<String>,
    /// Basename of the originating document. Provenance only, never parsed
    /// from content and excluded from JSON output.
    #[serde(skip)]
    pub source_file: Option<String>,
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self {
            slope: num_triple([1.0, 1.0, 1.0]),
            power: num_triple([1.0, 1.0, 1.0]),
            offset: num_triple([0.0, 0.0, 0.0]),
            saturation: 1.0,
            id: None,
            source_file: None,
        }
    }
}

impl ColorCorrection {
    /// Creates an identity correction (no color change).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the originating document name.
    pub fn with_source_file(mut self, name: impl Into<String>) -> Self {
        self.source_file = Some(name.into());
        self
    }

    /// Sets the slope values.
    pub fn with_slope(mut self, slope: [f32; 3]) -> Self {
        self.slope = num_triple(slope);
        self
    }

    /// Sets the offset values.
    pub fn with_offset(mut self, offset: [f32; 3]) -> Self {
        self.offset = num_triple(offset);
        self
    }

    /// Sets the power values.
    pub fn with_power(mut self, power: [f32; 3]) -> Self {
        self.power = num_triple(power);
        self
    }

    /// Sets the saturation value.
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    /// Check if this correction is identity (no-op).
    pub fn is_identity(&self) -> bool {
        self.slope == num_triple([1.0, 1.0, 1.0])
            && self.offset == num_triple([0.0, 0.0, 0.0])
            && self.power == num_triple([1.0, 1.0, 1.0])
            && (self.saturation - 1.0).abs() < 1e-6
    }

    /// Serializes this correction as a JSON object.
    ///
    /// Keys are `slope`, `power`, `offset`, `saturation` and `id`;
    /// `source_file` is provenance and not part of the payload.
    pub fn to_json(&self) -> CdlResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn fmt_triple(f: &mut fmt::Formatter<'_>, t: &Triple) -> fmt::Result {
    write!(f, "({}, {}, {})", t[0], t[1], t[2])
}

impl fmt::Display for ColorCorrection {
    /// Formats as `slope,power,offset,saturation` channel groups.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_triple(f, &self.slope)?;
        f.write_str(",")?;
        fmt_triple(f, &self.power)?;
        f.write_str(",")?;
        fmt_triple(f, &self.offset)?;
        write!(f, ",{}", self.saturation)
    }
}

impl ColorCorrection {
    /// Returns the slope as floats, substituting the identity value for any
    /// retained-text channel.
    pub fn slope_f32(&self) -> [f32; 3] {
        triple_f32(&self.slope, 1.0)
    }

    /// Returns the power as floats, substituting the identity value for any
    /// retained-text channel.
    pub fn power_f32(&self) -> [f32; 3] {
        triple_f32(&self.power, 1.0)
    }

    /// Returns the offset as floats, substituting the identity value for any
    /// retained-text channel.
    pub fn offset_f32(&self) -> [f32; 3] {
        triple_f32(&self.offset, 0.0)
    }
}

fn triple_f32(t: &Triple, fallback: f32) -> [f32; 3] {
    [
        t[0].as_f32().unwrap_or(fallback),
        t[1].as_f32().unwrap_or(fallback),
        t[2].as_f32().unwrap_or(fallback),
    ]
}
