//! A retained vector scene built from surface primitive calls.

use crate::colour::{resolve_colour, SceneColour};
use inkrelay_core::{ColourValue, LineCap, StrokeAppearance, Surface};
use kurbo::{BezPath, Rect};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

/// Scene export errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown background colour: {0}")]
    InvalidBackground(String),
    #[error("Failed to format SVG: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Scene canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,
    /// Colour identifier painted under everything and into erased regions.
    pub background: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            background: "white".to_string(),
        }
    }
}

/// One painted element of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Stroke {
        path: BezPath,
        colour: SceneColour,
        width: f64,
        appearance: StrokeAppearance,
    },
    Clear(Rect),
}

/// A [`Surface`] that keeps what was drawn as vector items.
///
/// Follows canvas semantics: `stroke` paints the whole current path with the
/// current state, so repeated strokes of a growing path collapse into one
/// item. Unknown colour identifiers are ignored and keep the previous colour.
#[derive(Debug, Clone)]
pub struct SceneSurface {
    config: SceneConfig,
    items: Vec<SceneItem>,
    path: BezPath,
    /// Index of the item showing the current path, while it can be updated.
    open_item: Option<usize>,
    colour: SceneColour,
    width: f64,
    appearance: StrokeAppearance,
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl SceneSurface {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            path: BezPath::new(),
            open_item: None,
            colour: SceneColour::BLACK,
            width: 1.0,
            appearance: StrokeAppearance::default(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Number of stroke items in the scene.
    pub fn stroke_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, SceneItem::Stroke { .. }))
            .count()
    }

    /// Render the scene as an SVG document.
    pub fn to_svg(&self) -> Result<String, SceneError> {
        let background = resolve_colour(&ColourValue::new(self.config.background.as_str()))
            .ok_or_else(|| SceneError::InvalidBackground(self.config.background.clone()))?;
        let background_hex = background.hex();

        let mut blurs: Vec<f64> = Vec::new();
        for item in &self.items {
            if let SceneItem::Stroke { appearance, .. } = item {
                if appearance.blur > 0.0 && !blurs.contains(&appearance.blur) {
                    blurs.push(appearance.blur);
                }
            }
        }

        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.config.width,
            h = self.config.height
        )?;
        if !blurs.is_empty() {
            svg.push_str("<defs>\n");
            for (index, blur) in blurs.iter().enumerate() {
                writeln!(
                    svg,
                    r#"<filter id="blur-{}"><feGaussianBlur stdDeviation="{}"/></filter>"#,
                    index, blur
                )?;
            }
            svg.push_str("</defs>\n");
        }
        writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            background_hex
        )?;

        for item in &self.items {
            match item {
                SceneItem::Stroke {
                    path,
                    colour,
                    width,
                    appearance,
                } => {
                    let filter = blurs
                        .iter()
                        .position(|b| *b == appearance.blur)
                        .map(|index| format!(r#" filter="url(#blur-{})""#, index))
                        .unwrap_or_default();
                    writeln!(
                        svg,
                        r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="{}" stroke-linejoin="round"{}/>"#,
                        path.to_svg(),
                        colour.hex(),
                        colour.opacity(),
                        width,
                        linecap_name(appearance.line_cap),
                        filter
                    )?;
                }
                SceneItem::Clear(rect) => {
                    writeln!(
                        svg,
                        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                        background_hex
                    )?;
                }
            }
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    /// Write the scene as an SVG file.
    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let svg = self.to_svg()?;
        std::fs::write(path, svg).map_err(|source| SceneError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

fn linecap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

impl Surface for SceneSurface {
    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.open_item = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to((x, y));
    }

    fn stroke(&mut self) {
        let item = SceneItem::Stroke {
            path: self.path.clone(),
            colour: self.colour,
            width: self.width,
            appearance: self.appearance,
        };

        let reusable = self.open_item.filter(|&index| {
            matches!(
                &self.items[index],
                SceneItem::Stroke { colour, width, appearance, .. }
                    if *colour == self.colour && *width == self.width && *appearance == self.appearance
            )
        });
        match reusable {
            Some(index) => self.items[index] = item,
            None => {
                self.items.push(item);
                self.open_item = Some(self.items.len() - 1);
            }
        }
    }

    fn set_stroke_colour(&mut self, colour: &ColourValue) {
        match resolve_colour(colour) {
            Some(resolved) => self.colour = resolved,
            None => log::warn!("Unknown colour {}, keeping previous stroke colour", colour),
        }
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.width = width;
        }
    }

    fn set_appearance(&mut self, appearance: &StrokeAppearance) {
        self.appearance = *appearance;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.items.push(SceneItem::Clear(Rect::new(x, y, x + width, y + height)));
        self.open_item = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkrelay_core::{Batch, DrawingPoint, Replayer, StyleMarker};

    fn stroke_batch(colour: &str) -> Batch {
        Batch::from_entries(vec![
            StyleMarker::new(colour).into(),
            DrawingPoint::new(0.0, 0.0, 3.0).into(),
            DrawingPoint::new(10.0, 0.0, 3.0).into(),
            DrawingPoint::new(10.0, 10.0, 3.0).into(),
        ])
    }

    #[test]
    fn test_growing_path_is_one_item() {
        let mut scene = SceneSurface::default();
        Replayer::default().replay(&stroke_batch("red"), &mut scene);

        assert_eq!(scene.stroke_count(), 1);
        match &scene.items()[0] {
            SceneItem::Stroke { path, width, colour, .. } => {
                assert_eq!(path.elements().len(), 3);
                assert_eq!(*width, 3.0);
                assert_eq!(colour.hex(), "#ff0000");
            }
            other => panic!("unexpected item {:?}", other),
        }
    }

    #[test]
    fn test_separate_batches_are_separate_items() {
        let mut scene = SceneSurface::default();
        let mut replayer = Replayer::default();
        replayer.replay(&stroke_batch("red"), &mut scene);
        replayer.replay(&stroke_batch("blue"), &mut scene);

        assert_eq!(scene.stroke_count(), 2);
    }

    #[test]
    fn test_eraser_adds_clear_rects() {
        let batch = Batch::from_entries(vec![
            StyleMarker::new("transparent").into(),
            DrawingPoint::new(5.0, 5.0, 4.0).into(),
            DrawingPoint::new(9.0, 5.0, 4.0).into(),
        ]);
        let mut scene = SceneSurface::default();
        Replayer::default().replay(&batch, &mut scene);

        assert_eq!(scene.stroke_count(), 0);
        assert_eq!(scene.items()[0], SceneItem::Clear(Rect::new(5.0, 5.0, 9.0, 9.0)));
    }

    #[test]
    fn test_unknown_colour_keeps_previous() {
        let mut scene = SceneSurface::default();
        scene.set_stroke_colour(&ColourValue::new("blue"));
        scene.set_stroke_colour(&ColourValue::new("not-a-colour"));
        scene.begin_path();
        scene.move_to(0.0, 0.0);
        scene.line_to(1.0, 1.0);
        scene.stroke();

        match &scene.items()[0] {
            SceneItem::Stroke { colour, .. } => assert_eq!(colour.hex(), "#0000ff"),
            other => panic!("unexpected item {:?}", other),
        }
    }

    #[test]
    fn test_svg_output() {
        let mut scene = SceneSurface::new(SceneConfig {
            width: 200.0,
            height: 100.0,
            background: "white".to_string(),
        });
        Replayer::default().replay(&stroke_batch("red"), &mut scene);
        scene.clear_rect(1.0, 2.0, 3.0, 4.0);

        let svg = scene.to_svg().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r##"stroke="#ff0000""##));
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"filter="url(#blur-0)""#));
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="#ffffff"/>"##));
    }

    #[test]
    fn test_invalid_background() {
        let scene = SceneSurface::new(SceneConfig {
            background: "paper".to_string(),
            ..SceneConfig::default()
        });
        assert!(matches!(scene.to_svg(), Err(SceneError::InvalidBackground(_))));
    }

    #[test]
    fn test_format_error_converts() {
        let err = SceneError::from(std::fmt::Error);
        assert!(matches!(err, SceneError::Format(_)));
        assert!(err.to_string().starts_with("Failed to format SVG"));
    }
}
