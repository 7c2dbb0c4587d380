use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of columns (and rows) of the board.
pub const GRID_SIDE: u8 = 4;

/// Number of distinct emoji pairs dealt per game.
pub const PAIR_COUNT: u8 = 8;

/// Number of card slots on the board.
pub const CARD_COUNT: u8 = PAIR_COUNT * 2;

/// Grid slot index, always in `0..CARD_COUNT`.
pub type Position = u8;

/// Stable identity of a card within one dealt deck.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// Identity of a confirmed match, unique within one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairId(pub u32);

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match-{}", self.0)
    }
}

/// Row and column of a grid slot, both zero based.
pub const fn grid_position(position: Position) -> (u8, u8) {
    (position / GRID_SIDE, position % GRID_SIDE)
}

/// Formats a number of seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so long games read as e.g. `75:03`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn grid_position_walks_rows_of_four() {
        assert_eq!(grid_position(0), (0, 0));
        assert_eq!(grid_position(3), (0, 3));
        assert_eq!(grid_position(4), (1, 0));
        assert_eq!(grid_position(15), (3, 3));
    }

    #[test]
    fn format_clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(4503), "75:03");
    }

    #[test]
    fn ids_display_with_prefixes() {
        assert_eq!(CardId(7).to_string(), "card-7");
        assert_eq!(PairId(2).to_string(), "match-2");
    }
}
