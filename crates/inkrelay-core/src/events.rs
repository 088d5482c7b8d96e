//! Drawing events and the batch wire format.
//!
//! A batch travels as a JSON array whose entries are either
//! `{"setActiveColour": "<colour>"}` or `[x, y, width]`.

use crate::style::ColourValue;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading or writing the batch wire format.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("Malformed batch: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One sampled location of an active stroke with the width in effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct DrawingPoint {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl DrawingPoint {
    pub fn new(x: f64, y: f64, width: f64) -> Self {
        Self { x, y, width }
    }

    /// Create from a located sample.
    pub fn at(location: Point, width: f64) -> Self {
        Self::new(location.x, location.y, width)
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<[f64; 3]> for DrawingPoint {
    fn from([x, y, width]: [f64; 3]) -> Self {
        Self { x, y, width }
    }
}

impl From<DrawingPoint> for [f64; 3] {
    fn from(point: DrawingPoint) -> Self {
        [point.x, point.y, point.width]
    }
}

/// A change of the active stroke colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleMarker {
    #[serde(rename = "setActiveColour")]
    pub set_active_colour: ColourValue,
}

impl StyleMarker {
    pub fn new(colour: impl Into<ColourValue>) -> Self {
        Self {
            set_active_colour: colour.into(),
        }
    }
}

/// A single batch entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Style(StyleMarker),
    Point(DrawingPoint),
}

impl BatchEntry {
    pub fn as_point(&self) -> Option<&DrawingPoint> {
        match self {
            BatchEntry::Point(point) => Some(point),
            BatchEntry::Style(_) => None,
        }
    }

    pub fn is_style(&self) -> bool {
        matches!(self, BatchEntry::Style(_))
    }
}

impl From<DrawingPoint> for BatchEntry {
    fn from(point: DrawingPoint) -> Self {
        BatchEntry::Point(point)
    }
}

impl From<StyleMarker> for BatchEntry {
    fn from(marker: StyleMarker) -> Self {
        BatchEntry::Style(marker)
    }
}

/// An ordered unit of delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch(Vec<BatchEntry>);

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<BatchEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<BatchEntry> {
        self.0
    }

    pub fn push(&mut self, entry: impl Into<BatchEntry>) {
        self.0.push(entry.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The drawing points of this batch, in order.
    pub fn points(&self) -> impl DoubleEndedIterator<Item = &DrawingPoint> {
        self.0.iter().filter_map(BatchEntry::as_point)
    }

    /// The colour of the leading style marker, if the batch starts with one.
    pub fn leading_colour(&self) -> Option<&ColourValue> {
        match self.0.first() {
            Some(BatchEntry::Style(marker)) => Some(&marker.set_active_colour),
            _ => None,
        }
    }

    /// Serialize to the compact wire format.
    pub fn to_json(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a batch from the wire format.
    pub fn from_json(json: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<BatchEntry> for Batch {
    fn from_iter<I: IntoIterator<Item = BatchEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a BatchEntry;
    type IntoIter = std::slice::Iter<'a, BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let mut batch = Batch::new();
        batch.push(StyleMarker::new("red"));
        batch.push(DrawingPoint::new(1.0, 2.5, 3.0));

        let json = batch.to_json().unwrap();
        assert_eq!(json, r#"[{"setActiveColour":"red"},[1.0,2.5,3.0]]"#);
    }

    #[test]
    fn test_parses_integer_triples() {
        let batch = Batch::from_json(r#"[{"setActiveColour":"transparent"},[0,0,2],[5,0,2]]"#).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.leading_colour(), Some(&ColourValue::Transparent));
        let points: Vec<_> = batch.points().copied().collect();
        assert_eq!(points, vec![DrawingPoint::new(0.0, 0.0, 2.0), DrawingPoint::new(5.0, 0.0, 2.0)]);
    }

    #[test]
    fn test_rejects_short_point() {
        assert!(Batch::from_json("[[1, 2]]").is_err());
    }

    #[test]
    fn test_rejects_unknown_object() {
        assert!(Batch::from_json(r#"[{"colour":"red"}]"#).is_err());
    }

    #[test]
    fn test_leading_colour_requires_marker_first() {
        let batch = Batch::from_entries(vec![
            DrawingPoint::new(0.0, 0.0, 1.0).into(),
            StyleMarker::new("red").into(),
        ]);
        assert_eq!(batch.leading_colour(), None);
    }
}
