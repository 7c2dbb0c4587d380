use serde::{Deserialize, Serialize};

use crate::{CardId, Position};

/// Fixed palette the deck draws its symbols from.
pub const EMOJI_PALETTE: [&str; 36] = [
    "🎯", "🎮", "🎲", "🎪", "🎨", "🎭", //
    "🎸", "🎺", "🎷", "🎤", "🎧", "🎵", //
    "⚽", "🏀", "🏈", "🎾", "🏐", "🏓", //
    "🚀", "🛸", "⭐", "🌟", "✨", "💫", //
    "🦄", "🐲", "🦋", "🐙", "🦊", "🐺", //
    "🌈", "🔥", "💎", "🎁", "🏆", "👑", //
];

/// A symbol on a card face, stored as an index into [`EMOJI_PALETTE`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Emoji(pub u8);

impl Emoji {
    pub fn glyph(self) -> &'static str {
        EMOJI_PALETTE
            .get(usize::from(self.0))
            .copied()
            .unwrap_or("❓")
    }
}

/// Lifecycle of a card slot.
///
/// Only moves forward, except `FaceUp -> Hidden` when a pair turns out not to match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    FaceUp,
    Matched,
    Collecting,
    Collected,
}

impl CardFace {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub emoji: Emoji,
    pub position: Position,
    pub face: CardFace,
}

impl Card {
    pub const fn new(id: CardId, emoji: Emoji, position: Position) -> Self {
        Self {
            id,
            emoji,
            position,
            face: CardFace::Hidden,
        }
    }

    /// Face up but not confirmed as part of a pair.
    pub const fn is_flipped(&self) -> bool {
        matches!(self.face, CardFace::FaceUp)
    }

    /// Confirmed part of a pair, including while it is being collected and afterwards.
    pub const fn is_matched(&self) -> bool {
        matches!(
            self.face,
            CardFace::Matched | CardFace::Collecting | CardFace::Collected
        )
    }

    pub const fn is_collecting(&self) -> bool {
        matches!(self.face, CardFace::Collecting)
    }

    pub const fn is_collected(&self) -> bool {
        matches!(self.face, CardFace::Collected)
    }

    /// Two cards match when they show the same symbol and are not the same card.
    pub fn matches(&self, other: &Card) -> bool {
        self.emoji == other.emoji && self.id != other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_falls_back_outside_palette() {
        assert_eq!(Emoji(0).glyph(), "🎯");
        assert_eq!(Emoji(35).glyph(), "👑");
        assert_eq!(Emoji(200).glyph(), "❓");
    }

    #[test]
    fn card_never_matches_itself() {
        let card = Card::new(CardId(3), Emoji(1), 0);
        let twin = Card::new(CardId(11), Emoji(1), 5);
        let other = Card::new(CardId(4), Emoji(2), 1);

        assert!(!card.matches(&card));
        assert!(card.matches(&twin));
        assert!(!card.matches(&other));
    }

    #[test]
    fn matched_flag_survives_collection() {
        let mut card = Card::new(CardId(0), Emoji(0), 0);
        assert!(!card.is_flipped() && !card.is_matched());

        card.face = CardFace::FaceUp;
        assert!(card.is_flipped() && !card.is_matched());

        card.face = CardFace::Collecting;
        assert!(card.is_matched() && card.is_collecting() && !card.is_flipped());

        card.face = CardFace::Collected;
        assert!(card.is_matched() && card.is_collected() && !card.is_collecting());
    }
}
