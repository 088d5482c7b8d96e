//! Reconstructing strokes from batches onto a destination surface.

use crate::events::{Batch, BatchEntry, DrawingPoint};
use crate::style::{ColourValue, StrokeAppearance};
use crate::surface::Surface;

/// Counts of what a replay produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub style_changes: usize,
    pub segments: usize,
    pub clears: usize,
}

#[derive(Debug, Clone, Default)]
struct PenState {
    colour: Option<ColourValue>,
    /// Last point of the open path, if one is open.
    pen: Option<DrawingPoint>,
}

impl PenState {
    fn is_eraser(&self) -> bool {
        self.colour.as_ref().is_some_and(ColourValue::is_eraser)
    }
}

/// Replays batches onto any [`Surface`].
///
/// The first point after the start of a replay or after a colour change
/// anchors a new path at that point's width; later points are joined to it
/// with stroked segments.
/// While the colour is transparent every point clears a `width × width`
/// square at its location instead, with no path operations.
///
/// By default each [`Replayer::replay`] call starts from a blank state, which
/// is what the self-describing batches are designed for. A continuous
/// replayer keeps colour and open path between calls.
#[derive(Debug, Clone, Default)]
pub struct Replayer {
    appearance: StrokeAppearance,
    continuous: bool,
    state: PenState,
}

impl Replayer {
    pub fn new(appearance: StrokeAppearance) -> Self {
        Self {
            appearance,
            continuous: false,
            state: PenState::default(),
        }
    }

    /// Keep colour and pen position across `replay` calls.
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn appearance(&self) -> &StrokeAppearance {
        &self.appearance
    }

    /// Colour currently in effect, if any marker has been seen.
    pub fn current_colour(&self) -> Option<&ColourValue> {
        self.state.colour.as_ref()
    }

    /// Forget colour and pen position.
    pub fn reset(&mut self) {
        self.state = PenState::default();
    }

    /// Apply one batch to `target`.
    pub fn replay(&mut self, batch: &Batch, target: &mut dyn Surface) -> ReplayStats {
        if !self.continuous {
            self.reset();
        }

        let mut stats = ReplayStats::default();
        target.set_appearance(&self.appearance);

        for entry in batch {
            match entry {
                BatchEntry::Style(marker) => {
                    let colour = &marker.set_active_colour;
                    if self.state.colour.as_ref() == Some(colour) {
                        continue;
                    }
                    target.set_stroke_colour(colour);
                    self.state.colour = Some(colour.clone());
                    self.state.pen = None;
                    stats.style_changes += 1;
                }
                BatchEntry::Point(point) => {
                    if self.state.is_eraser() {
                        target.clear_rect(point.x, point.y, point.width, point.width);
                        stats.clears += 1;
                        continue;
                    }

                    if self.state.pen.is_some() {
                        target.line_to(point.x, point.y);
                        target.stroke();
                        stats.segments += 1;
                    } else {
                        target.set_line_width(point.width);
                        target.begin_path();
                        target.move_to(point.x, point.y);
                    }
                    self.state.pen = Some(*point);
                }
            }
        }

        log::debug!(
            "Replayed batch of {} entries: {} segments, {} clears",
            batch.len(),
            stats.segments,
            stats.clears
        );
        stats
    }

    /// Replay several batches in order.
    pub fn replay_all<'a>(
        &mut self,
        batches: impl IntoIterator<Item = &'a Batch>,
        target: &mut dyn Surface,
    ) -> ReplayStats {
        batches
            .into_iter()
            .map(|batch| self.replay(batch, target))
            .fold(ReplayStats::default(), |total, stats| ReplayStats {
                style_changes: total.style_changes + stats.style_changes,
                segments: total.segments + stats.segments,
                clears: total.clears + stats.clears,
            })
    }
}
