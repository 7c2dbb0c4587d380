use super::*;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Deals the pairs in a uniformly shuffled order. The same seed always yields the same deck.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, selection: EmojiSelection) -> Deck {
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let emojis = select_emojis(&mut rng, selection);
        let mut slots: Vec<(CardId, Emoji)> = emojis
            .iter()
            .chain(emojis.iter())
            .enumerate()
            .map(|(i, &emoji)| (CardId(i as u8), emoji))
            .collect();

        slots.shuffle(&mut rng);

        let cards = slots
            .into_iter()
            .enumerate()
            .map(|(position, (id, emoji))| Card::new(id, emoji, position as Position))
            .collect();
        log::debug!("dealt deck from seed {} ({:?})", self.seed, selection);
        Deck::from_shuffled(cards)
    }
}

fn select_emojis(rng: &mut impl Rng, selection: EmojiSelection) -> [Emoji; PAIR_COUNT as usize] {
    let mut palette: [u8; EMOJI_PALETTE.len()] = core::array::from_fn(|i| i as u8);

    let chosen: &[u8] = match selection {
        EmojiSelection::Leading => &palette,
        EmojiSelection::Sampled => palette.partial_shuffle(rng, PAIR_COUNT.into()).0,
    };

    core::array::from_fn(|i| Emoji(chosen[i]))
}
