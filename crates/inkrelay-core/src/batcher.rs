//! Point batching with continuity across batch boundaries.

use crate::events::{Batch, BatchEntry, DrawingPoint, StyleMarker};
use crate::style::ColourValue;

/// Default number of buffered entries that triggers a flush.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Number of trailing entries carried into the next buffer after a
/// non-terminal flush.
pub const CONTINUITY_POINTS: usize = 2;

/// Why a batch is being flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushKind {
    /// The buffer reached the batch size. The stroke continues.
    Continuing,
    /// The style changed mid-stroke. The stroke continues from a single
    /// anchor in the new style.
    Restyled,
    /// The stroke ended.
    Terminal,
}

/// Accumulates drawing points and cuts them into self-describing batches.
///
/// Every emitted batch starts with a [`StyleMarker`] for the colour passed to
/// the flush. After a [`FlushKind::Continuing`] flush the buffer is re-seeded
/// with the last [`CONTINUITY_POINTS`] entries of the emitted batch, so a
/// consumer drawing each batch as its own path sees the segments overlap
/// instead of a gap. A [`FlushKind::Restyled`] flush carries no seeds; see
/// [`EventBatcher::restyle`].
#[derive(Debug, Clone)]
pub struct EventBatcher {
    batch_size: usize,
    buffer: Vec<BatchEntry>,
}

impl Default for EventBatcher {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl EventBatcher {
    /// Create a batcher flushing every `batch_size` buffered entries.
    ///
    /// Sizes below `CONTINUITY_POINTS + 1` are raised to that minimum so a
    /// re-seeded buffer can never trigger a flush on its own.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(CONTINUITY_POINTS + 1),
            buffer: Vec::new(),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Entries waiting for the next flush, continuity seeds included.
    pub fn buffered(&self) -> &[BatchEntry] {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Buffer a point; returns a batch when the buffer reaches the batch size.
    pub fn push(&mut self, point: DrawingPoint, colour: &ColourValue) -> Option<Batch> {
        self.buffer.push(BatchEntry::Point(point));
        if self.buffer.len() >= self.batch_size {
            self.flush(colour, FlushKind::Continuing)
        } else {
            None
        }
    }

    /// Cut the buffer into a batch led by a marker for `colour`.
    ///
    /// Returns `None` without touching state if nothing is buffered, so an
    /// empty stroke never yields a marker-only batch.
    pub fn flush(&mut self, colour: &ColourValue, kind: FlushKind) -> Option<Batch> {
        if self.buffer.is_empty() {
            return None;
        }

        let mut entries = Vec::with_capacity(self.buffer.len() + 1);
        entries.push(BatchEntry::Style(StyleMarker::new(colour.clone())));
        entries.append(&mut self.buffer);

        if kind == FlushKind::Continuing {
            let seed_from = entries.len().saturating_sub(CONTINUITY_POINTS);
            self.buffer.extend_from_slice(&entries[seed_from..]);
        }

        log::debug!(
            "Flushing batch of {} entries ({:?}, colour {})",
            entries.len(),
            kind,
            colour
        );
        Some(Batch::from_entries(entries))
    }

    /// Cut the buffer under the outgoing `colour` and start the next batch at
    /// `anchor` alone.
    ///
    /// The next buffer never holds points drawn in the old style. Pass `None`
    /// when the new style needs no anchor (erasing). Nothing is seeded if
    /// nothing was flushed.
    pub fn restyle(&mut self, colour: &ColourValue, anchor: Option<DrawingPoint>) -> Option<Batch> {
        let batch = self.flush(colour, FlushKind::Restyled)?;
        self.buffer.extend(anchor.map(BatchEntry::Point));
        Some(batch)
    }

    /// Drop everything buffered without emitting it.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
