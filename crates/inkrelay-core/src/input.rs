//! Input events for stroke capture and their mapping to surface coordinates.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// One contact point of a touch sample, in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// A raw location sample from the input layer.
///
/// Pointer samples already carry surface-relative offsets. Touch samples carry
/// client coordinates plus the surface's bounding box at the time of the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSample {
    Pointer { offset_x: f64, offset_y: f64 },
    Touch { touches: Vec<TouchPoint>, bounds: Rect },
}

impl InputSample {
    /// A pointer sample at a surface-relative offset.
    pub fn pointer(offset_x: f64, offset_y: f64) -> Self {
        InputSample::Pointer { offset_x, offset_y }
    }

    /// A single-contact touch sample.
    pub fn touch(client_x: f64, client_y: f64, bounds: Rect) -> Self {
        InputSample::Touch {
            touches: vec![TouchPoint::new(client_x, client_y)],
            bounds,
        }
    }

    /// Resolve this sample to surface-local coordinates.
    ///
    /// Only the first touch of a multi-touch sample is used; `touch_offset`
    /// is subtracted from touch locations on each axis. Returns `None` for a
    /// touch sample without any contact point.
    pub fn locate(&self, touch_offset: Vec2) -> Option<Point> {
        match self {
            InputSample::Pointer { offset_x, offset_y } => Some(Point::new(*offset_x, *offset_y)),
            InputSample::Touch { touches, bounds } => {
                let touch = touches.first()?;
                Some(Point::new(
                    touch.client_x - bounds.x0 - touch_offset.x,
                    touch.client_y - bounds.y0 - touch_offset.y,
                ))
            }
        }
    }
}

/// Input events the capture state machine reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "sample", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer pressed on the surface.
    Down(InputSample),
    /// Pointer moved.
    Move(InputSample),
    /// Pointer released.
    Up,
    /// Pointer left the surface.
    Leave,
    TouchStart(InputSample),
    TouchMove(InputSample),
    TouchEnd,
}

/// What an input event means for a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeSignal {
    Start(Point),
    Move(Point),
    End,
    /// The event could not be located and is dropped.
    Ignored,
}

impl InputEvent {
    /// Classify this event into a stroke signal, locating it if needed.
    pub fn signal(&self, touch_offset: Vec2) -> StrokeSignal {
        match self {
            InputEvent::Down(sample) | InputEvent::TouchStart(sample) => sample
                .locate(touch_offset)
                .map_or(StrokeSignal::Ignored, StrokeSignal::Start),
            InputEvent::Move(sample) | InputEvent::TouchMove(sample) => sample
                .locate(touch_offset)
                .map_or(StrokeSignal::Ignored, StrokeSignal::Move),
            InputEvent::Up | InputEvent::Leave | InputEvent::TouchEnd => StrokeSignal::End,
        }
    }
}
