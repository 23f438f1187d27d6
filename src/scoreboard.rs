//! Session win tally
//!
//! Tracks round outcomes across one play session. In-memory only: rounds
//! are ephemeral and nothing here touches storage.

use serde::{Deserialize, Serialize};

use crate::sim::{PlayerId, RoundOutcome};

/// Running tally of round outcomes for one play session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished round.
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(PlayerId::A) => self.wins_a += 1,
            RoundOutcome::Win(PlayerId::B) => self.wins_b += 1,
            RoundOutcome::Draw => self.draws += 1,
        }
    }

    pub fn wins(&self, id: PlayerId) -> u32 {
        match id {
            PlayerId::A => self.wins_a,
            PlayerId::B => self.wins_b,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.wins_a + self.wins_b + self.draws
    }

    /// Session leader by rounds won, if the session isn't tied.
    pub fn leader(&self) -> Option<PlayerId> {
        use std::cmp::Ordering;
        match self.wins_a.cmp(&self.wins_b) {
            Ordering::Greater => Some(PlayerId::A),
            Ordering::Less => Some(PlayerId::B),
            Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_and_leader() {
        let mut board = Scoreboard::new();
        assert_eq!(board.rounds_played(), 0);
        assert_eq!(board.leader(), None);

        board.record(RoundOutcome::Win(PlayerId::A));
        board.record(RoundOutcome::Win(PlayerId::B));
        board.record(RoundOutcome::Win(PlayerId::B));
        board.record(RoundOutcome::Draw);

        assert_eq!(board.wins(PlayerId::A), 1);
        assert_eq!(board.wins(PlayerId::B), 2);
        assert_eq!(board.draws, 1);
        assert_eq!(board.rounds_played(), 4);
        assert_eq!(board.leader(), Some(PlayerId::B));
    }

    #[test]
    fn test_serializes_for_hud() {
        let mut board = Scoreboard::new();
        board.record(RoundOutcome::Draw);
        let json = serde_json::to_string(&board).unwrap();
        let back: Scoreboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.draws, 1);
    }
}
