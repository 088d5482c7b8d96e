//! Scripted capture sessions.

use inkrelay_core::{InputEvent, PaletteSwatch, StrokeCapture, StyleSelection};
use serde::{Deserialize, Serialize};

/// One step of a recorded or synthetic input session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Feed an input event to the capture.
    Input { event: InputEvent },
    /// Pick a style from raw attributes.
    Style {
        #[serde(default)]
        colour: Option<String>,
        #[serde(default)]
        width: Option<String>,
    },
    /// Pick a palette swatch.
    Swatch { swatch: PaletteSwatch },
    /// Clear the capture surface.
    Clear,
}

impl ScriptStep {
    pub fn apply(&self, capture: &mut StrokeCapture) {
        match self {
            ScriptStep::Input { event } => capture.handle(event),
            ScriptStep::Style { colour, width } => {
                capture.set_active_style(StyleSelection::parse(colour.as_deref(), width.as_deref()))
            }
            ScriptStep::Swatch { swatch } => capture.set_active_style(swatch.selection()),
            ScriptStep::Clear => capture.clear(),
        }
    }
}

/// Run every step against `capture`, ending any stroke left open.
pub fn run_script(steps: &[ScriptStep], capture: &mut StrokeCapture) {
    for step in steps {
        step.apply(capture);
    }
    if capture.is_active() {
        log::warn!("Script ended mid-stroke, ending it");
        capture.end_stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkrelay_core::{Batch, ColourValue};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SCRIPT: &str = r#"[
        {"step": "style", "colour": "red", "width": "2"},
        {"step": "input", "event": {"type": "down", "sample": {"kind": "pointer", "offset_x": 0.0, "offset_y": 0.0}}},
        {"step": "input", "event": {"type": "move", "sample": {"kind": "pointer", "offset_x": 5.0, "offset_y": 0.0}}},
        {"step": "input", "event": {"type": "move", "sample": {"kind": "pointer", "offset_x": 10.0, "offset_y": 0.0}}},
        {"step": "input", "event": {"type": "up"}},
        {"step": "swatch", "swatch": {"id": "transparent", "thickness": "12"}},
        {"step": "input", "event": {"type": "down", "sample": {"kind": "pointer", "offset_x": 1.0, "offset_y": 1.0}}},
        {"step": "input", "event": {"type": "move", "sample": {"kind": "pointer", "offset_x": 2.0, "offset_y": 2.0}}}
    ]"#;

    #[test]
    fn test_script_produces_batches() {
        let steps: Vec<ScriptStep> = serde_json::from_str(SCRIPT).unwrap();
        let batches = Rc::new(RefCell::new(Vec::<Batch>::new()));
        let sink = batches.clone();

        let mut capture = StrokeCapture::default();
        capture.on_batch(move |batch| sink.borrow_mut().push(batch.clone()));
        run_script(&steps, &mut capture);

        let batches = batches.borrow();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].leading_colour(), Some(&ColourValue::new("red")));
        assert_eq!(batches[0].points().count(), 2);
        assert_eq!(batches[1].leading_colour(), Some(&ColourValue::Transparent));
        assert_eq!(batches[1].points().next().unwrap().width, 12.0);
        assert!(!capture.is_active());
    }
}
