use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, selection: EmojiSelection) -> Deck;
}

/// Which palette entries end up on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmojiSelection {
    /// The first [`PAIR_COUNT`] entries of the palette, every game.
    Leading,
    /// [`PAIR_COUNT`] distinct entries drawn with the deck's own RNG.
    Sampled,
}

impl Default for EmojiSelection {
    fn default() -> Self {
        Self::Leading
    }
}
