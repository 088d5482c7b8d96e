//! Palette swatches and selection state.

use crate::style::{ColourValue, StyleSelection};
use serde::{Deserialize, Serialize};

/// Attributes of one selectable swatch, as read from the palette markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSwatch {
    pub background_colour: Option<String>,
    pub data_colour: Option<String>,
    pub id: Option<String>,
    pub thickness: Option<String>,
}

impl PaletteSwatch {
    /// A swatch identified only by its colour.
    pub fn colour(colour: impl Into<String>) -> Self {
        Self {
            data_colour: Some(colour.into()),
            ..Self::default()
        }
    }

    pub fn with_thickness(mut self, thickness: impl Into<String>) -> Self {
        self.thickness = Some(thickness.into());
        self
    }

    /// The colour this swatch selects: the first non-empty of background
    /// colour, data colour and id.
    pub fn resolved_colour(&self) -> Option<&str> {
        [&self.background_colour, &self.data_colour, &self.id]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .map(str::trim)
            .find(|c| !c.is_empty())
    }

    pub fn selection(&self) -> StyleSelection {
        StyleSelection::parse(self.resolved_colour(), self.thickness.as_deref())
    }
}

/// A set of swatches with at most one active.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    swatches: Vec<PaletteSwatch>,
    active: Option<usize>,
    selected_colour: Option<ColourValue>,
}

impl Palette {
    pub fn new(swatches: Vec<PaletteSwatch>) -> Self {
        Self {
            swatches,
            active: None,
            selected_colour: None,
        }
    }

    pub fn swatches(&self) -> &[PaletteSwatch] {
        &self.swatches
    }

    /// Index of the active swatch.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Colour of the most recent selection that named one.
    pub fn selected_colour(&self) -> Option<&ColourValue> {
        self.selected_colour.as_ref()
    }

    /// Activate the swatch at `index` and return the style it selects.
    ///
    /// Returns `None` for an out-of-range index, leaving state unchanged.
    pub fn select(&mut self, index: usize) -> Option<StyleSelection> {
        let selection = self.swatches.get(index)?.selection();
        self.active = Some(index);
        if let Some(colour) = &selection.colour {
            self.selected_colour = Some(colour.clone());
        }
        log::debug!("Palette swatch {} selected: {:?}", index, selection);
        Some(selection)
    }
}
