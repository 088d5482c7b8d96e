//! InkRelay Core Library
//!
//! Captures freehand strokes as drawing events, cuts them into
//! self-describing batches for transport, and replays batches onto any
//! destination surface.

pub mod batcher;
pub mod capture;
pub mod config;
pub mod events;
pub mod input;
pub mod notifier;
pub mod palette;
pub mod replay;
pub mod storage;
pub mod style;
pub mod surface;

pub use batcher::{EventBatcher, FlushKind, DEFAULT_BATCH_SIZE};
pub use capture::{StrokeCapture, StrokeSession};
pub use config::{CaptureConfig, ConfigError};
pub use events::{Batch, BatchEntry, DrawingPoint, StyleMarker, WireError};
pub use input::{InputEvent, InputSample, StrokeSignal, TouchPoint};
pub use notifier::Notifier;
pub use palette::{Palette, PaletteSwatch};
pub use replay::{ReplayStats, Replayer};
pub use storage::{BatchStore, MemoryBatchStore, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileBatchStore;
pub use style::{ColourValue, LineCap, StrokeAppearance, StyleSelection};
pub use surface::{DrawCommand, RecordingSurface, Surface};
