use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const BASE_POINTS: u32 = 10_000;
const MOVE_PENALTY: u32 = 10;
const SECOND_PENALTY: u32 = 5;

/// Points for a finished game, never below zero.
pub fn compute_score(moves: u32, time: u32) -> u32 {
    BASE_POINTS
        .saturating_sub(moves.saturating_mul(MOVE_PENALTY))
        .saturating_sub(time.saturating_mul(SECOND_PENALTY))
}

/// Result of one completed game, as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub moves: u32,
    /// Whole seconds spent playing.
    pub time: u32,
    pub date: DateTime<Utc>,
}

impl GameScore {
    pub fn new(moves: u32, time: u32, date: DateTime<Utc>) -> Self {
        Self { moves, time, date }
    }

    pub fn points(&self) -> u32 {
        compute_score(self.moves, self.time)
    }

    /// Fewer moves wins, equal moves fall back to less time. Exact ties do not win.
    pub fn beats(&self, best: &GameScore) -> bool {
        self.moves < best.moves || (self.moves == best.moves && self.time < best.time)
    }
}

/// Score of the game that just finished.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: GameScore,
    pub points: u32,
    pub new_best: bool,
    pub rating: PerformanceRating,
}

impl GameResult {
    pub fn new(score: GameScore, new_best: bool) -> Self {
        Self {
            points: score.points(),
            rating: PerformanceRating::from_moves(score.moves),
            score,
            new_best,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceRating {
    Perfect,
    Excellent,
    Great,
    Good,
    KeepTrying,
}

impl PerformanceRating {
    pub const fn from_moves(moves: u32) -> Self {
        match moves {
            ..=12 => Self::Perfect,
            13..=18 => Self::Excellent,
            19..=24 => Self::Great,
            25..=30 => Self::Good,
            _ => Self::KeepTrying,
        }
    }

    pub const fn label(self) -> &'static str {
        use PerformanceRating::*;
        match self {
            Perfect => "Perfect",
            Excellent => "Excellent",
            Great => "Great",
            Good => "Good",
            KeepTrying => "Keep Trying",
        }
    }

    pub const fn badge(self) -> &'static str {
        use PerformanceRating::*;
        match self {
            Perfect => "🏆",
            Excellent => "⭐",
            Great => "🎯",
            Good => "👍",
            KeepTrying => "💪",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(moves: u32, time: u32) -> GameScore {
        GameScore::new(moves, time, DateTime::<Utc>::from_timestamp_millis(0).unwrap())
    }

    #[test]
    fn compute_score_reference_points() {
        assert_eq!(compute_score(0, 0), 10_000);
        assert_eq!(compute_score(10, 30), 9_750);
        assert_eq!(compute_score(1_000, 0), 0);
        assert_eq!(compute_score(u32::MAX, u32::MAX), 0);
    }

    #[test]
    fn compute_score_is_monotone() {
        for moves in 0..60 {
            for time in (0..600).step_by(7) {
                let here = compute_score(moves, time);
                assert!(compute_score(moves + 1, time) <= here);
                assert!(compute_score(moves, time + 1) <= here);
            }
        }
    }

    #[test]
    fn best_score_replacement_rule() {
        let best = score(20, 60);

        assert!(score(18, 90).beats(&best));
        assert!(score(20, 50).beats(&best));
        assert!(!score(20, 60).beats(&best));
        assert!(!score(21, 10).beats(&best));
        assert!(!score(20, 61).beats(&best));
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(PerformanceRating::from_moves(8), PerformanceRating::Perfect);
        assert_eq!(PerformanceRating::from_moves(12), PerformanceRating::Perfect);
        assert_eq!(PerformanceRating::from_moves(13), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_moves(24), PerformanceRating::Great);
        assert_eq!(PerformanceRating::from_moves(30), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_moves(31), PerformanceRating::KeepTrying);
        assert_eq!(PerformanceRating::KeepTrying.label(), "Keep Trying");
    }

    #[test]
    fn score_serializes_with_iso_date() {
        let json = serde_json::to_value(score(14, 75)).unwrap();
        assert_eq!(json["moves"], 14);
        assert_eq!(json["time"], 75);
        assert_eq!(json["date"], "1970-01-01T00:00:00Z");
    }
}
