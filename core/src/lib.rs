#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use schedule::*;
pub use scoring::*;
pub use session::*;
pub use snapshot::*;
pub use store::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod schedule;
mod scoring;
mod session;
mod snapshot;
mod store;
mod types;

/// Animation windows, in milliseconds, the engine waits on between state changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// How long a fresh match stays highlighted before collection starts.
    pub match_highlight_ms: u32,
    /// How long a pair travels to the collection tray.
    pub collection_move_ms: u32,
    /// How long a mismatched pair stays face up.
    pub auto_flip_back_ms: u32,
    /// Period of the elapsed-time counter.
    pub tick_ms: u32,
    /// Presentation only: card turn-over animation.
    pub card_flip_ms: u32,
    /// Presentation only: spin played while a pair is collected.
    pub collection_spin_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            match_highlight_ms: 500,
            collection_move_ms: 1000,
            auto_flip_back_ms: 1500,
            tick_ms: 1000,
            card_flip_ms: 600,
            collection_spin_ms: 800,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub timings: Timings,
    pub emoji_selection: EmojiSelection,
}

impl GameConfig {
    pub const fn new_unchecked(timings: Timings, emoji_selection: EmojiSelection) -> Self {
        Self {
            timings,
            emoji_selection,
        }
    }

    /// The tick period is raised to at least 1ms, a zero period never lets the clock move on.
    pub fn new(timings: Timings, emoji_selection: EmojiSelection) -> Self {
        let timings = Timings {
            tick_ms: timings.tick_ms.max(1),
            ..timings
        };
        Self::new_unchecked(timings, emoji_selection)
    }
}

/// A dealt board: [`CARD_COUNT`] cards, two per symbol, indexed by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub(crate) fn from_shuffled(cards: Vec<Card>) -> Self {
        debug_assert_eq!(cards.len(), usize::from(CARD_COUNT));
        Self { cards }
    }

    /// Lays out a fixed board, card `i` gets id `i` and position `i`.
    pub fn from_emojis(emojis: &[Emoji]) -> Option<Self> {
        if emojis.len() != usize::from(CARD_COUNT) {
            return None;
        }
        let all_paired = emojis
            .iter()
            .all(|emoji| emojis.iter().filter(|&other| other == emoji).count() == 2);
        if !all_paired {
            return None;
        }

        let cards = emojis
            .iter()
            .enumerate()
            .map(|(i, &emoji)| Card::new(CardId(i as u8), emoji, i as Position))
            .collect();
        Some(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Outcome of a card click.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    /// First card of an attempt is face up.
    Flipped,
    /// Second card completed a pair.
    Matched(PairMatch),
    /// Second card did not match, both will turn back over.
    Mismatched([CardId; 2]),
}

impl FlipOutcome {
    pub const fn is_attempt(self) -> bool {
        !matches!(self, Self::Flipped)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairMatch {
    pub pair: PairId,
    pub emoji: Emoji,
    pub cards: [CardId; 2],
}

/// Outcome of a deferred transition applied to the board.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TransitionOutcome {
    NoChange,
    Changed,
    /// The last pair was collected and the game is over.
    Completed,
}

impl TransitionOutcome {
    pub const fn has_update(self) -> bool {
        use TransitionOutcome::*;
        match self {
            NoChange => false,
            Changed => true,
            Completed => true,
        }
    }
}
