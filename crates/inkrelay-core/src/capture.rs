//! Stroke capture: turns input events into drawing points and batches.

use crate::batcher::{EventBatcher, FlushKind};
use crate::config::{CaptureConfig, ConfigError};
use crate::events::{Batch, BatchEntry, DrawingPoint};
use crate::input::{InputEvent, StrokeSignal};
use crate::notifier::Notifier;
use crate::style::{ColourValue, StyleSelection};
use crate::surface::{clear_all, Surface};
use kurbo::{Point, Vec2};
use std::fmt;
use uuid::Uuid;

/// State of one stroke, from stroke-start to stroke-end.
#[derive(Debug, Clone)]
pub struct StrokeSession {
    id: Uuid,
    colour: ColourValue,
    line_width: f64,
    origin: Point,
    cursor: Point,
    samples: usize,
    batcher: EventBatcher,
}

impl StrokeSession {
    fn new(origin: Point, colour: ColourValue, line_width: f64, batch_size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            colour,
            line_width,
            origin,
            cursor: origin,
            samples: 0,
            batcher: EventBatcher::new(batch_size),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Colour this stroke is drawn with.
    pub fn colour(&self) -> &ColourValue {
        &self.colour
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Where the stroke started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The most recent location of the stroke.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Move samples accepted so far.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Entries waiting for the next flush.
    pub fn buffered(&self) -> &[BatchEntry] {
        self.batcher.buffered()
    }
}

/// Captures strokes from one input surface.
///
/// Idle until a stroke starts; while active, every move sample becomes a
/// [`DrawingPoint`] that is painted on the optional local surface and fed to
/// the session's batcher. Flushed batches go to the registered subscriber.
pub struct StrokeCapture {
    config: CaptureConfig,
    touch_offset: Vec2,
    active_colour: ColourValue,
    line_width: f64,
    session: Option<StrokeSession>,
    notifier: Notifier,
    surface: Option<Box<dyn Surface>>,
}

impl fmt::Debug for StrokeCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrokeCapture")
            .field("config", &self.config)
            .field("active_colour", &self.active_colour)
            .field("line_width", &self.line_width)
            .field("session", &self.session)
            .field("notifier", &self.notifier)
            .field("has_surface", &self.surface.is_some())
            .finish()
    }
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::from_valid_config(CaptureConfig::default())
    }
}

impl StrokeCapture {
    /// Create a capture instance after validating `config`.
    pub fn new(config: CaptureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CaptureConfig) -> Self {
        Self {
            touch_offset: config.touch_offset_vec(),
            active_colour: config.initial_colour.clone(),
            line_width: config.initial_line_width,
            config,
            session: None,
            notifier: Notifier::new(),
            surface: None,
        }
    }

    /// Paint strokes onto `surface` while capturing them.
    pub fn with_surface(mut self, surface: Box<dyn Surface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Register the batch subscriber, replacing any previous one.
    pub fn on_batch(&mut self, callback: impl FnMut(&Batch) + 'static) -> &mut Self {
        self.notifier.register(callback);
        self
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Palette colour used by the next stroke.
    pub fn active_colour(&self) -> &ColourValue {
        &self.active_colour
    }

    /// Palette width used by the next stroke.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    pub fn surface(&self) -> Option<&dyn Surface> {
        self.surface.as_deref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut (dyn Surface + 'static)> {
        self.surface.as_deref_mut()
    }

    /// Apply a palette selection.
    ///
    /// An absent colour keeps the current one. During a stroke, a style
    /// change first flushes the points drawn so far under the old style; the
    /// stroke continues from the current location in the new style.
    pub fn set_active_style(&mut self, selection: StyleSelection) {
        if let Some(colour) = selection.colour {
            self.active_colour = colour;
        }
        self.line_width = selection.width;

        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.colour != self.active_colour || session.line_width != self.line_width {
            let anchor = (!self.active_colour.is_eraser())
                .then(|| DrawingPoint::at(session.cursor, self.line_width));
            if let Some(batch) = session.batcher.restyle(&session.colour, anchor) {
                self.notifier.deliver(&batch);
            }
            session.colour = self.active_colour.clone();
        }
        session.line_width = self.line_width;

        if let Some(surface) = self.surface.as_deref_mut() {
            surface.set_stroke_colour(&session.colour);
            surface.set_line_width(session.line_width);
            surface.begin_path();
            surface.move_to(session.cursor.x, session.cursor.y);
        }
        log::debug!(
            "Stroke {} restyled to {} width {}",
            session.id,
            session.colour,
            session.line_width
        );
    }

    /// Feed one input event through the state machine.
    pub fn handle(&mut self, event: &InputEvent) {
        match event.signal(self.touch_offset) {
            StrokeSignal::Start(location) => self.start_stroke(location),
            StrokeSignal::Move(location) => self.add_sample(location),
            StrokeSignal::End => self.end_stroke(),
            StrokeSignal::Ignored => log::trace!("Ignoring unlocatable input {:?}", event),
        }
    }

    /// Begin a stroke at `location`. A stroke still in progress is ended first.
    pub fn start_stroke(&mut self, location: Point) {
        if self.session.is_some() {
            log::debug!("Stroke start while active, ending previous stroke");
            self.end_stroke();
        }

        let session = StrokeSession::new(
            location,
            self.active_colour.clone(),
            self.line_width,
            self.config.batch_size,
        );
        log::debug!(
            "Stroke {} started at ({}, {}) with {} width {}",
            session.id,
            location.x,
            location.y,
            session.colour,
            session.line_width
        );

        if let Some(surface) = self.surface.as_deref_mut() {
            surface.set_line_width(session.line_width);
            surface.set_appearance(&self.config.appearance);
            surface.begin_path();
            surface.move_to(location.x, location.y);
            surface.set_stroke_colour(&session.colour);
        }

        self.session = Some(session);
    }

    /// Record a move sample. Ignored while no stroke is active.
    pub fn add_sample(&mut self, location: Point) {
        let Some(session) = self.session.as_mut() else {
            log::trace!("Move sample at ({}, {}) outside a stroke", location.x, location.y);
            return;
        };

        let point = DrawingPoint::at(location, session.line_width);

        if let Some(surface) = self.surface.as_deref_mut() {
            if session.colour.is_eraser() {
                surface.clear_rect(point.x, point.y, point.width, point.width);
            } else {
                surface.line_to(point.x, point.y);
                surface.stroke();
            }
        }

        session.cursor = location;
        session.samples += 1;
        if let Some(batch) = session.batcher.push(point, &session.colour) {
            self.notifier.deliver(&batch);
        }
    }

    /// End the current stroke, flushing whatever is buffered.
    pub fn end_stroke(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        log::debug!("Stroke {} ended after {} samples", session.id, session.samples);
        if let Some(batch) = session.batcher.flush(&session.colour, FlushKind::Terminal) {
            self.notifier.deliver(&batch);
        }
    }

    /// Clear the local surface.
    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_deref_mut() {
            clear_all(surface);
        }
    }

    /// Tear down the capture surface, discarding any stroke in progress
    /// without delivering it.
    pub fn dispose(&mut self) -> Option<Box<dyn Surface>> {
        if let Some(session) = self.session.take() {
            log::debug!(
                "Discarding stroke {} with {} buffered entries",
                session.id,
                session.buffered().len()
            );
        }
        self.notifier.unregister();
        self.surface.take()
    }
}
