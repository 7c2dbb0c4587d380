use alloc::vec::Vec;
use chrono::{DateTime, TimeDelta, Utc};

use crate::*;

/// One player's game: board rules, timers, elapsed time and the best score across games.
///
/// Everything runs on the caller's thread. Time only moves when the host passes a `now` in
/// or hands back a fired [`EffectToken`].
#[derive(Debug)]
pub struct GameSession<S> {
    config: GameConfig,
    engine: PlayEngine,
    scheduler: Scheduler,
    elapsed_secs: u32,
    tick: Option<EffectToken>,
    scores: ScoreBoard<S>,
    last_result: Option<GameResult>,
}

impl<S: Store> GameSession<S> {
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let deck = RandomDeckGenerator::new(seed).generate(config.emoji_selection);
        Self::with_deck(config, store, deck)
    }

    pub fn with_deck(config: GameConfig, store: S, deck: Deck) -> Self {
        Self {
            config: GameConfig::new(config.timings, config.emoji_selection),
            engine: PlayEngine::new(deck),
            scheduler: Scheduler::new(),
            elapsed_secs: 0,
            tick: None,
            scores: ScoreBoard::load(store),
            last_result: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn epoch(&self) -> Epoch {
        self.scheduler.epoch()
    }

    pub fn best_score(&self) -> Option<&GameScore> {
        self.scores.best()
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    pub fn store(&self) -> &S {
        self.scores.store()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    /// Deals a fresh shuffled deck, dropping every pending timer of the previous game.
    pub fn start_new_game(&mut self, seed: u64) {
        let deck = RandomDeckGenerator::new(seed).generate(self.config.emoji_selection);
        self.restart_with_deck(deck);
    }

    pub fn restart_with_deck(&mut self, deck: Deck) {
        self.scheduler.reset();
        self.engine = PlayEngine::new(deck);
        self.elapsed_secs = 0;
        self.tick = None;
        self.last_result = None;
        log::debug!("new game in epoch {:?}", self.scheduler.epoch());
    }

    /// Handles a click on a card. Clicks the board cannot take are ignored.
    /// Returns whether anything changed.
    pub fn handle_card_click(&mut self, id: CardId, now: DateTime<Utc>) -> bool {
        let was_waiting = self.engine.state().is_waiting();

        let outcome = match self.engine.apply_flip(id) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::trace!("ignored click on {}: {}", id, err);
                return false;
            }
        };

        if was_waiting {
            log::debug!("game started");
            self.start_clock(now);
        }

        let timings = self.config.timings;
        match outcome {
            FlipOutcome::Flipped => {}
            FlipOutcome::Matched(pair) => {
                self.scheduler.schedule_after(
                    now,
                    timings.match_highlight_ms,
                    Effect::StartCollecting(pair),
                );
            }
            FlipOutcome::Mismatched(cards) => {
                self.scheduler
                    .schedule_after(now, timings.auto_flip_back_ms, Effect::FlipBack(cards));
            }
        }
        true
    }

    /// Applies a fired timer. Stale or cancelled tokens are ignored.
    /// Returns whether anything changed.
    pub fn fire(&mut self, token: EffectToken) -> bool {
        match self.scheduler.take(token) {
            Some(entry) => self.apply_effect(entry),
            None => false,
        }
    }

    /// Fires every effect due at or before `now`, in order. Returns how many changed anything.
    pub fn advance(&mut self, now: DateTime<Utc>) -> usize {
        let mut changed = 0;
        while let Some(entry) = self
            .scheduler
            .peek_next()
            .copied()
            .filter(|entry| entry.due <= now)
        {
            if self.fire(entry.token) {
                changed += 1;
            }
        }
        changed
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.scheduler.peek_next().map(|entry| entry.due)
    }

    /// Effects scheduled since the last call, for the host to arm timers with.
    pub fn drain_scheduled(&mut self) -> Vec<Scheduled> {
        self.scheduler.drain_new()
    }

    /// Halts the elapsed-time counter. Only a game in progress can pause.
    pub fn pause(&mut self) -> bool {
        match self.engine.apply_pause(true) {
            Ok(outcome) if outcome.has_update() => {
                self.stop_clock();
                log::debug!("game paused at {}s", self.elapsed_secs);
                true
            }
            Ok(_) => false,
            Err(err) => {
                log::trace!("ignored pause: {}", err);
                false
            }
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) -> bool {
        match self.engine.apply_pause(false) {
            Ok(TransitionOutcome::Changed) => {
                self.start_clock(now);
                log::debug!("game resumed");
                true
            }
            Ok(TransitionOutcome::Completed) => {
                self.finish(now);
                true
            }
            Ok(TransitionOutcome::NoChange) => false,
            Err(err) => {
                log::trace!("ignored resume: {}", err);
                false
            }
        }
    }

    fn apply_effect(&mut self, entry: Scheduled) -> bool {
        let Scheduled { due, effect, .. } = entry;
        let timings = self.config.timings;

        match effect {
            Effect::Tick => {
                self.tick = None;
                if !self.engine.state().is_playing() {
                    return false;
                }
                self.elapsed_secs = self.elapsed_secs.saturating_add(1);
                self.tick = Some(self.scheduler.schedule(
                    due + TimeDelta::milliseconds(timings.tick_ms.into()),
                    Effect::Tick,
                ));
                true
            }
            Effect::StartCollecting(pair) => {
                let outcome = self.engine.apply_collecting(&pair);
                if outcome.has_update() {
                    self.scheduler.schedule_after(
                        due,
                        timings.collection_move_ms,
                        Effect::FinishCollecting(pair),
                    );
                }
                outcome.has_update()
            }
            Effect::FinishCollecting(pair) => match self.engine.apply_collect(&pair, due) {
                TransitionOutcome::Completed => {
                    self.finish(due);
                    true
                }
                outcome => outcome.has_update(),
            },
            Effect::FlipBack(cards) => self.engine.apply_flip_back(cards).has_update(),
        }
    }

    fn start_clock(&mut self, now: DateTime<Utc>) {
        self.stop_clock();
        self.tick = Some(
            self.scheduler
                .schedule_after(now, self.config.timings.tick_ms, Effect::Tick),
        );
    }

    fn stop_clock(&mut self) {
        if let Some(token) = self.tick.take() {
            self.scheduler.cancel(token);
        }
    }

    fn finish(&mut self, at: DateTime<Utc>) {
        self.stop_clock();

        let score = GameScore::new(self.engine.moves(), self.elapsed_secs, at);
        let new_best = self.scores.submit(&score);
        log::info!(
            "game complete: {} moves in {}s ({} points)",
            score.moves,
            score.time,
            score.points()
        );
        self.last_result = Some(GameResult::new(score, new_best));
    }
}
