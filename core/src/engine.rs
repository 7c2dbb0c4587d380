use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Waiting,
    Playing,
    Paused,
    Complete,
}

impl EngineState {
    pub const fn is_waiting(self) -> bool {
        matches!(self, Self::Waiting)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Waiting
    }
}

/// A pair whose both cards reached the tray.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedPair {
    pub id: PairId,
    pub emoji: Emoji,
    pub collected_at: DateTime<Utc>,
}

/// Board rules of one game, without any notion of timers.
///
/// Every mutation is a reducer over `(state, event)`: it either applies in full or is
/// rejected with a [`GameError`] and leaves the board untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    cards: Vec<Card>,
    flipped: SmallVec<[CardId; 2]>,
    matched: Vec<PairId>,
    collected: Vec<CollectedPair>,
    moves: u32,
    state: EngineState,
    next_pair: u32,
}

impl PlayEngine {
    pub fn new(deck: Deck) -> Self {
        Self {
            cards: deck.into_cards(),
            flipped: SmallVec::new(),
            matched: Vec::new(),
            collected: Vec::new(),
            moves: 0,
            state: Default::default(),
            next_pair: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_at(&self, position: Position) -> Option<&Card> {
        self.cards.get(usize::from(position))
    }

    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    pub fn matched(&self) -> &[PairId] {
        &self.matched
    }

    pub fn collected(&self) -> &[CollectedPair] {
        &self.collected
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn all_collected(&self) -> bool {
        self.collected.len() == usize::from(PAIR_COUNT)
    }

    /// Whether a click on this card would be accepted right now.
    pub fn can_flip(&self, id: CardId) -> bool {
        self.check_accepting().is_ok()
            && self.flipped.len() < 2
            && self.card(id).is_some_and(|card| card.face.is_hidden())
    }

    /// Turns a card face up, resolving the attempt when it is the second one.
    pub fn apply_flip(&mut self, id: CardId) -> Result<FlipOutcome> {
        self.check_accepting()?;

        let index = self.index_of(id)?;
        if !self.cards[index].face.is_hidden() {
            return Err(GameError::CardUnavailable(id));
        }
        if self.flipped.len() >= 2 {
            return Err(GameError::PendingResolution);
        }

        self.mark_started();
        self.cards[index].face = CardFace::FaceUp;
        self.flipped.push(id);

        let &[first, second] = self.flipped.as_slice() else {
            return Ok(FlipOutcome::Flipped);
        };

        self.moves = self.moves.saturating_add(1);
        let (first_card, second_card) = (self.cards[self.index_of(first)?], self.cards[index]);

        if first_card.matches(&second_card) {
            Ok(FlipOutcome::Matched(self.apply_match(first_card, second_card)))
        } else {
            Ok(FlipOutcome::Mismatched([first, second]))
        }
    }

    fn apply_match(&mut self, first: Card, second: Card) -> PairMatch {
        let pair = PairId(self.next_pair);
        self.next_pair += 1;

        self.set_face(&[first.id, second.id], CardFace::Matched);
        self.matched.push(pair);
        self.flipped.clear();

        log::debug!("{} matched {} and {}", pair, first.id, second.id);
        PairMatch {
            pair,
            emoji: first.emoji,
            cards: [first.id, second.id],
        }
    }

    /// Turns a mismatched pair back over and frees the attempt.
    pub fn apply_flip_back(&mut self, cards: [CardId; 2]) -> TransitionOutcome {
        if !self.flipped.iter().eq(cards.iter()) {
            return TransitionOutcome::NoChange;
        }

        self.set_face(&cards, CardFace::Hidden);
        self.flipped.clear();
        TransitionOutcome::Changed
    }

    /// Moves a highlighted pair into its collection animation.
    pub fn apply_collecting(&mut self, pair: &PairMatch) -> TransitionOutcome {
        if !self.faces_are(&pair.cards, CardFace::Matched) {
            return TransitionOutcome::NoChange;
        }

        self.set_face(&pair.cards, CardFace::Collecting);
        TransitionOutcome::Changed
    }

    /// Lands a pair in the tray, completing the game when it was the last one.
    pub fn apply_collect(&mut self, pair: &PairMatch, at: DateTime<Utc>) -> TransitionOutcome {
        if !self.faces_are(&pair.cards, CardFace::Collecting) {
            return TransitionOutcome::NoChange;
        }

        self.set_face(&pair.cards, CardFace::Collected);
        self.collected.push(CollectedPair {
            id: pair.pair,
            emoji: pair.emoji,
            collected_at: at,
        });

        if self.try_complete() {
            TransitionOutcome::Completed
        } else {
            TransitionOutcome::Changed
        }
    }

    /// Pauses or resumes a game in progress.
    pub fn apply_pause(&mut self, paused: bool) -> Result<TransitionOutcome> {
        use EngineState::*;

        Ok(match (self.state, paused) {
            (Playing, true) => {
                self.state = Paused;
                TransitionOutcome::Changed
            }
            (Paused, false) => {
                self.state = Playing;
                if self.try_complete() {
                    TransitionOutcome::Completed
                } else {
                    TransitionOutcome::Changed
                }
            }
            (Playing, false) | (Paused, true) => TransitionOutcome::NoChange,
            (Waiting, _) => return Err(GameError::NotPlaying),
            (Complete, _) => return Err(GameError::AlreadyEnded),
        })
    }

    fn try_complete(&mut self) -> bool {
        if self.state.is_playing() && self.all_collected() {
            self.state = EngineState::Complete;
            true
        } else {
            false
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_waiting() {
            self.state = EngineState::Playing;
        }
    }

    fn check_accepting(&self) -> Result<()> {
        match self.state {
            EngineState::Waiting | EngineState::Playing => Ok(()),
            EngineState::Paused => Err(GameError::Paused),
            EngineState::Complete => Err(GameError::AlreadyEnded),
        }
    }

    fn index_of(&self, id: CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|card| card.id == id)
            .ok_or(GameError::UnknownCard(id))
    }

    fn faces_are(&self, ids: &[CardId], face: CardFace) -> bool {
        ids.iter()
            .all(|&id| self.card(id).is_some_and(|card| card.face == face))
    }

    fn set_face(&mut self, ids: &[CardId], face: CardFace) {
        for card in self.cards.iter_mut().filter(|card| ids.contains(&card.id)) {
            card.face = face;
        }
    }
}
