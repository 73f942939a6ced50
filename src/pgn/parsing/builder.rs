//! Move slot builder
//!
//! Accumulates the slot currently being assembled by the line parser. A builder may exist
//! before any half is played (a `4...` marker opens one), so attachment decisions look at
//! [MoveBuilder::last_half] rather than at the builder's mere existence.

use crate::pgn::ast::{Color, MovePosition, MoveSlot};

#[derive(Debug)]
pub(crate) struct MoveBuilder {
    slot: MoveSlot,
    last_half: Option<Color>,
}

impl MoveBuilder {
    pub fn new(number: u32) -> Self {
        Self {
            slot: MoveSlot::new(number),
            last_half: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.slot.number
    }

    pub fn has(&self, color: Color) -> bool {
        self.slot.san(color).is_some()
    }

    pub fn play(&mut self, color: Color, san: &str) {
        self.slot.set_san(color, san);
        self.last_half = Some(color);
    }

    /// The most recently played half in this slot
    pub fn last_played(&self) -> Option<MovePosition> {
        self.last_half
            .map(|color| MovePosition::new(self.slot.number, color))
    }

    /// The slot, if `position` is one of its played halves
    pub fn slot_for(&mut self, position: MovePosition) -> Option<&mut MoveSlot> {
        (self.slot.number == position.number && self.has(position.color)).then_some(&mut self.slot)
    }

    /// Finished slot; builders that never received a half are discarded
    pub fn finish(self) -> Option<MoveSlot> {
        (!self.slot.is_empty()).then_some(self.slot)
    }
}
