use serde::{Deserialize, Serialize};

use crate::game::showdown::HandOutcome;

/// One resolved hand, as stored in the hand-history file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRecord {
    pub hand_number: u32,
    pub pot: u32,
    pub board: Vec<String>,
    pub winners: Vec<WinnerRecord>,
    /// False when everyone else folded before showdown.
    pub contested: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub name: String,
    pub amount: u32,
}

impl From<&HandOutcome> for HandRecord {
    fn from(outcome: &HandOutcome) -> Self {
        Self {
            hand_number: outcome.hand_number,
            pot: outcome.pot,
            board: outcome.board.iter().map(|c| c.to_string()).collect(),
            winners: outcome
                .winners
                .iter()
                .map(|w| WinnerRecord {
                    name: w.name.clone(),
                    amount: w.amount,
                })
                .collect(),
            contested: outcome.contested,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandHistory {
    pub hands: Vec<HandRecord>,
}

impl HandHistory {
    pub fn total_hands(&self) -> usize {
        self.hands.len()
    }

    pub fn biggest_pot(&self) -> u32 {
        self.hands.iter().map(|h| h.pot).max().unwrap_or(0)
    }

    pub fn showdown_hands(&self) -> usize {
        self.hands.iter().filter(|h| h.contested).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::deck::{Card, Rank, Suit};
    use crate::game::showdown::WinnerShare;

    #[test]
    fn record_from_outcome_formats_board_cards() {
        let outcome = HandOutcome {
            hand_number: 3,
            pot: 120,
            board: vec![
                Card::new(Rank::Ace, Suit::Spades),
                Card::new(Rank::Ten, Suit::Hearts),
            ],
            winners: vec![WinnerShare {
                name: "Bot 2".to_string(),
                amount: 120,
            }],
            contested: true,
        };

        let record = HandRecord::from(&outcome);
        assert_eq!(record.board, vec!["A♠", "T♥"]);
        assert_eq!(record.winners[0].amount, 120);
        assert!(record.contested);
    }

    #[test]
    fn history_summaries() {
        let mut history = HandHistory::default();
        assert_eq!(history.biggest_pot(), 0);

        for (pot, contested) in [(40, false), (310, true), (90, true)] {
            history.hands.push(HandRecord {
                hand_number: 1,
                pot,
                board: Vec::new(),
                winners: Vec::new(),
                contested,
            });
        }
        assert_eq!(history.total_hands(), 3);
        assert_eq!(history.biggest_pot(), 310);
        assert_eq!(history.showdown_hands(), 2);
    }
}
