use super::deck::Card;
use super::hand::{evaluate, HandValue};
use super::seat::Seat;

/// Result of resolving a pot: who won, what each share was, and the
/// contenders' evaluations when hands were actually shown.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Winning seat indices, in seating order.
    pub winners: Vec<usize>,
    /// Chips awarded per winner, parallel to `winners`.
    pub shares: Vec<u32>,
    /// False when everyone else folded and no hands were shown.
    pub contested: bool,
    /// Evaluations of every contender, in seating order.
    pub revealed: Vec<(usize, HandValue)>,
}

/// Outcome record handed to the hand-history side channel.
#[derive(Debug, Clone)]
pub struct HandOutcome {
    pub hand_number: u32,
    pub pot: u32,
    pub board: Vec<Card>,
    pub winners: Vec<WinnerShare>,
    pub contested: bool,
}

#[derive(Debug, Clone)]
pub struct WinnerShare {
    pub name: String,
    pub amount: u32,
}

/// Awards `pot` to the non-folded seats. A lone survivor takes the pot
/// uncontested; otherwise every contender's best hand is evaluated against
/// the board and the tied best split it, remainder to the first winner in
/// seating order. The pot is a single shared pot: no side-pot tiers.
pub fn resolve(seats: &mut [Seat], board: &[Card], pot: u32) -> Resolution {
    let contenders: Vec<usize> = seats
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.folded)
        .map(|(i, _)| i)
        .collect();

    if let [lone] = contenders[..] {
        seats[lone].stack += pot;
        seats[lone].total_won += pot;
        return Resolution {
            winners: vec![lone],
            shares: vec![pot],
            contested: false,
            revealed: Vec::new(),
        };
    }

    let revealed: Vec<(usize, HandValue)> = contenders
        .iter()
        .map(|&i| {
            let mut cards = seats[i].hole.clone();
            cards.extend_from_slice(board);
            (i, evaluate(&cards))
        })
        .collect();

    let best = revealed
        .iter()
        .map(|(_, v)| v)
        .max()
        .cloned()
        .unwrap_or(HandValue {
            category: super::hand::HandCategory::HighCard,
            tiebreak: Vec::new(),
        });

    let winners: Vec<usize> = revealed
        .iter()
        .filter(|(_, v)| *v == best)
        .map(|(i, _)| *i)
        .collect();

    let split = pot / winners.len() as u32;
    let remainder = pot - split * winners.len() as u32;

    let mut shares = Vec::with_capacity(winners.len());
    for (k, &w) in winners.iter().enumerate() {
        let share = if k == 0 { split + remainder } else { split };
        seats[w].stack += share;
        seats[w].total_won += share;
        shares.push(share);
    }

    Resolution {
        winners,
        shares,
        contested: true,
        revealed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::policy::Difficulty;
    use crate::game::deck::{Card, Rank, Suit};

    fn seat(name: &str, stack: u32, hole: &[(Rank, Suit)]) -> Seat {
        let mut seat = Seat::bot(name, Difficulty::Medium, stack);
        seat.hole = hole.iter().map(|&(r, s)| Card::new(r, s)).collect();
        seat
    }

    fn board() -> Vec<Card> {
        vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Diamonds),
            Card::new(Rank::Nine, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Spades),
        ]
    }

    #[test]
    fn lone_survivor_wins_uncontested() {
        let mut seats = vec![
            seat("A", 100, &[(Rank::Ace, Suit::Spades), (Rank::King, Suit::Spades)]),
            seat("B", 100, &[(Rank::Two, Suit::Hearts), (Rank::Three, Suit::Hearts)]),
        ];
        seats[1].folded = true;

        let resolution = resolve(&mut seats, &board(), 90);
        assert!(!resolution.contested);
        assert_eq!(resolution.winners, vec![0]);
        assert_eq!(seats[0].stack, 190);
        assert_eq!(seats[0].total_won, 90);
        assert!(resolution.revealed.is_empty());
    }

    #[test]
    fn best_hand_takes_the_whole_pot() {
        let mut seats = vec![
            seat("A", 0, &[(Rank::Queen, Suit::Hearts), (Rank::Queen, Suit::Diamonds)]),
            seat("B", 0, &[(Rank::Ace, Suit::Spades), (Rank::King, Suit::Hearts)]),
        ];

        let resolution = resolve(&mut seats, &board(), 200);
        assert!(resolution.contested);
        assert_eq!(resolution.winners, vec![0]);
        assert_eq!(seats[0].stack, 200);
        assert_eq!(seats[1].stack, 0);
    }

    #[test]
    fn three_way_tie_splits_with_remainder_to_first_seat() {
        // identical best hands: everyone plays the board straight
        let full_board = vec![
            Card::new(Rank::Eight, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Diamonds),
            Card::new(Rank::Ten, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Clubs),
            Card::new(Rank::Queen, Suit::Spades),
        ];
        let mut seats = vec![
            seat("A", 0, &[(Rank::Two, Suit::Spades), (Rank::Three, Suit::Hearts)]),
            seat("B", 0, &[(Rank::Two, Suit::Diamonds), (Rank::Three, Suit::Clubs)]),
            seat("C", 0, &[(Rank::Two, Suit::Hearts), (Rank::Four, Suit::Clubs)]),
        ];

        let resolution = resolve(&mut seats, &full_board, 301);
        assert_eq!(resolution.winners, vec![0, 1, 2]);
        assert_eq!(resolution.shares, vec![101, 100, 100]);
        assert_eq!(seats[0].stack, 101);
        assert_eq!(seats[1].stack, 100);
        assert_eq!(seats[2].stack, 100);
    }

    #[test]
    fn kickers_break_category_ties() {
        let mut seats = vec![
            seat("A", 0, &[(Rank::Ace, Suit::Spades), (Rank::Four, Suit::Hearts)]),
            seat("B", 0, &[(Rank::King, Suit::Diamonds), (Rank::Four, Suit::Clubs)]),
        ];

        let resolution = resolve(&mut seats, &board(), 100);
        assert_eq!(resolution.winners, vec![0]);
    }
}
