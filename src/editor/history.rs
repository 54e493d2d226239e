//! Recently used colours.

use crate::types::Rgb;

/// Maximum number of colours kept.
pub const MAX_RECENT_COLOURS: usize = 10;

/// Most-recently-used colour list, newest first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColourHistory {
    colours: Vec<Rgb>,
}

impl ColourHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a use of `colour`, moving it to the front if already present.
    pub fn push(&mut self, colour: Rgb) {
        self.colours.retain(|c| *c != colour);
        self.colours.insert(0, colour);
        self.colours.truncate(MAX_RECENT_COLOURS);
    }

    /// Colours, most recent first.
    pub fn colours(&self) -> &[Rgb] {
        &self.colours
    }

    pub fn latest(&self) -> Option<Rgb> {
        self.colours.first().copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
