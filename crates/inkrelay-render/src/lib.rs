//! InkRelay Render Library
//!
//! Destination surfaces for replayed strokes. The scene surface keeps
//! replayed strokes as `kurbo` paths with resolved `peniko` colours and
//! exports them as SVG.

mod colour;
mod scene;

pub use colour::{resolve_colour, SceneColour};
pub use scene::{SceneConfig, SceneError, SceneItem, SceneSurface};
