//! Rendering-primitive seam used by capture and replay.

use crate::style::{ColourValue, StrokeAppearance};
use serde::{Deserialize, Serialize};

/// Side length used by [`clear_all`] to cover any practical surface.
pub const CLEAR_ALL_EXTENT: f64 = 100_000.0;

/// Canvas-style drawing primitives.
///
/// Implementations decide what the calls mean in pixels; capture and replay
/// only rely on the call order. `stroke` paints the current path with the
/// current colour, width and appearance.
pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn set_stroke_colour(&mut self, colour: &ColourValue);
    fn set_line_width(&mut self, width: f64);
    fn set_appearance(&mut self, appearance: &StrokeAppearance);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// Clear the whole surface.
pub fn clear_all(surface: &mut dyn Surface) {
    surface.clear_rect(0.0, 0.0, CLEAR_ALL_EXTENT, CLEAR_ALL_EXTENT);
}

/// A recorded primitive call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Stroke,
    SetStrokeColour { colour: ColourValue },
    SetLineWidth { width: f64 },
    SetAppearance { appearance: StrokeAppearance },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
}

impl DrawCommand {
    /// Whether this call puts ink on the surface.
    pub fn is_stroke(&self) -> bool {
        matches!(self, DrawCommand::Stroke)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, DrawCommand::ClearRect { .. })
    }
}

/// Surface that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_stroke_colour(&mut self, colour: &ColourValue) {
        self.commands.push(DrawCommand::SetStrokeColour {
            colour: colour.clone(),
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth { width });
    }

    fn set_appearance(&mut self, appearance: &StrokeAppearance) {
        self.commands.push(DrawCommand::SetAppearance {
            appearance: *appearance,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }
}
