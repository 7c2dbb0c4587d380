use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a session for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub flipped: Vec<CardId>,
    pub matched: Vec<PairId>,
    pub collected: Vec<CollectedPair>,
    pub moves: u32,
    pub elapsed_secs: u32,
    pub state: EngineState,
    pub best_score: Option<GameScore>,
    pub last_result: Option<GameResult>,
}

impl Snapshot {
    pub fn from_session<S: Store>(session: &GameSession<S>) -> Self {
        let engine = session.engine();
        Self {
            cards: engine.cards().to_vec(),
            flipped: engine.flipped().to_vec(),
            matched: engine.matched().to_vec(),
            collected: engine.collected().to_vec(),
            moves: engine.moves(),
            elapsed_secs: session.elapsed_secs(),
            state: engine.state(),
            best_score: session.best_score().cloned(),
            last_result: session.last_result().cloned(),
        }
    }

    pub fn collected_pairs(&self) -> usize {
        self.collected.len()
    }

    pub const fn total_pairs(&self) -> usize {
        PAIR_COUNT as usize
    }

    /// Share of pairs collected, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.collected_pairs() as f32 / self.total_pairs() as f32
    }

    /// Cards laid out row by row.
    pub fn rows(&self) -> impl Iterator<Item = &[Card]> {
        self.cards.chunks(usize::from(GRID_SIDE))
    }
}
