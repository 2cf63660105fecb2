use super::deck::{Card, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "high card",
            HandCategory::Pair => "pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
        }
    }
}

/// Totally-ordered strength descriptor for the best 5-card hand.
///
/// The derived `Ord` compares `category` first, then `tiebreak`
/// lexicographically, so two values compare exactly like the tuples
/// `(category, tiebreak...)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandValue {
    pub category: HandCategory,
    pub tiebreak: Vec<u8>,
}

impl HandValue {
    fn new(category: HandCategory, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }

    /// Short human label, e.g. "flush, K high".
    pub fn describe(&self) -> String {
        match self.tiebreak.first() {
            Some(&high) => format!("{}, {} high", self.category.label(), value_symbol(high)),
            None => self.category.label().to_string(),
        }
    }
}

fn value_symbol(v: u8) -> &'static str {
    match v {
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "T",
        11 => "J",
        12 => "Q",
        13 => "K",
        14 => "A",
        _ => "?",
    }
}

/// Returns the high card of the best straight within `desc` (distinct rank
/// values, descending), or None. The wheel A-2-3-4-5 counts as a 5-high
/// straight; the ace is treated as low in that one case only, and only when
/// no higher straight exists.
fn straight_high(desc: &[u8]) -> Option<u8> {
    let mut run = 1u8;
    for w in desc.windows(2) {
        if w[0] == w[1] + 1 {
            run += 1;
            if run >= 5 {
                return Some(w[1] + 4);
            }
        } else {
            run = 1;
        }
    }

    // wheel: ace counted low
    if [14, 5, 4, 3, 2].iter().all(|v| desc.contains(v)) {
        return Some(5);
    }

    None
}

/// Evaluates the best 5-card poker hand contained in 5 to 7 cards.
/// Behavior is undefined for fewer than 5 cards (debug-asserted).
pub fn evaluate(cards: &[Card]) -> HandValue {
    debug_assert!(cards.len() >= 5, "evaluate needs at least 5 cards");

    let values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();

    let mut rank_count = [0u8; 15];
    for &v in &values {
        rank_count[v as usize] += 1;
    }

    let flush_suit: Option<Suit> = Suit::ALL
        .into_iter()
        .find(|&s| cards.iter().filter(|c| c.suit == s).count() >= 5);

    let desc_vals = |pred: &dyn Fn(u8) -> bool| -> Vec<u8> {
        (2..=14u8).rev().filter(|&v| pred(v)).collect()
    };

    let uniq: Vec<u8> = desc_vals(&|v| rank_count[v as usize] > 0);
    let st_high = straight_high(&uniq);

    // Straight flush is checked only within the flush suit's ranks.
    if let Some(suit) = flush_suit {
        let mut suited: Vec<u8> = cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.value())
            .collect();
        suited.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(high) = straight_high(&suited) {
            return HandValue::new(HandCategory::StraightFlush, vec![high]);
        }
    }

    if let Some(four) = (2..=14u8).rev().find(|&v| rank_count[v as usize] == 4) {
        let kicker = *values.iter().filter(|&&v| v != four).max().unwrap_or(&0);
        return HandValue::new(HandCategory::FourOfAKind, vec![four, kicker]);
    }

    let trips: Vec<u8> = desc_vals(&|v| rank_count[v as usize] == 3);
    let pairs: Vec<u8> = desc_vals(&|v| rank_count[v as usize] == 2);

    if let Some(&t) = trips.first() {
        // either two distinct trip-ranks, or one trip plus a separate pair
        if let Some(&second) = trips.get(1) {
            return HandValue::new(HandCategory::FullHouse, vec![t, second]);
        }
        if let Some(&p) = pairs.first() {
            return HandValue::new(HandCategory::FullHouse, vec![t, p]);
        }
    }

    if let Some(suit) = flush_suit {
        let mut suited: Vec<u8> = cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank.value())
            .collect();
        suited.sort_unstable_by(|a, b| b.cmp(a));
        suited.truncate(5);
        return HandValue::new(HandCategory::Flush, suited);
    }

    if let Some(high) = st_high {
        return HandValue::new(HandCategory::Straight, vec![high]);
    }

    if let Some(&t) = trips.first() {
        let mut tb = vec![t];
        let mut kickers: Vec<u8> = values.iter().copied().filter(|&v| v != t).collect();
        kickers.sort_unstable_by(|a, b| b.cmp(a));
        tb.extend(kickers.into_iter().take(2));
        return HandValue::new(HandCategory::ThreeOfAKind, tb);
    }

    if pairs.len() >= 2 {
        let (p1, p2) = (pairs[0], pairs[1]);
        let kicker = *values
            .iter()
            .filter(|&&v| v != p1 && v != p2)
            .max()
            .unwrap_or(&0);
        return HandValue::new(HandCategory::TwoPair, vec![p1, p2, kicker]);
    }

    if let Some(&p) = pairs.first() {
        let mut tb = vec![p];
        let mut kickers: Vec<u8> = values.iter().copied().filter(|&v| v != p).collect();
        kickers.sort_unstable_by(|a, b| b.cmp(a));
        tb.extend(kickers.into_iter().take(3));
        return HandValue::new(HandCategory::Pair, tb);
    }

    let mut highs = values;
    highs.sort_unstable_by(|a, b| b.cmp(a));
    highs.truncate(5);
    HandValue::new(HandCategory::HighCard, highs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::deck::{Card, Rank, Suit};

    fn cards(ranks: &[(Rank, Suit)]) -> Vec<Card> {
        ranks.iter().map(|&(r, s)| Card::new(r, s)).collect()
    }

    #[test]
    fn wheel_straight_flush_with_extra_cards() {
        let hand = cards(&[
            (Rank::Ace, Suit::Spades),
            (Rank::Two, Suit::Spades),
            (Rank::Three, Suit::Spades),
            (Rank::Four, Suit::Spades),
            (Rank::Five, Suit::Spades),
            (Rank::King, Suit::Hearts),
            (Rank::Queen, Suit::Diamonds),
        ]);
        let v = evaluate(&hand);
        assert_eq!(v.category, HandCategory::StraightFlush);
        assert_eq!(v.tiebreak, vec![5]);
    }

    #[test]
    fn six_high_straight_beats_wheel() {
        let wheel = evaluate(&cards(&[
            (Rank::Ace, Suit::Spades),
            (Rank::Two, Suit::Hearts),
            (Rank::Three, Suit::Diamonds),
            (Rank::Four, Suit::Clubs),
            (Rank::Five, Suit::Spades),
        ]));
        assert_eq!(wheel.category, HandCategory::Straight);
        assert_eq!(wheel.tiebreak, vec![5]);

        // with a six present, the higher straight must win out over the wheel
        let six_high = evaluate(&cards(&[
            (Rank::Ace, Suit::Spades),
            (Rank::Two, Suit::Hearts),
            (Rank::Three, Suit::Diamonds),
            (Rank::Four, Suit::Clubs),
            (Rank::Five, Suit::Spades),
            (Rank::Six, Suit::Hearts),
        ]));
        assert_eq!(six_high.tiebreak, vec![6]);
        assert!(six_high > wheel);
    }

    #[test]
    fn straight_with_mixed_suits_is_not_a_straight_flush() {
        let v = evaluate(&cards(&[
            (Rank::Ace, Suit::Spades),
            (Rank::King, Suit::Spades),
            (Rank::Queen, Suit::Spades),
            (Rank::Jack, Suit::Spades),
            (Rank::Ten, Suit::Hearts),
        ]));
        assert_eq!(v.category, HandCategory::Straight);
        assert_eq!(v.tiebreak, vec![14]);
    }

    #[test]
    fn full_house_from_two_trips_keeps_higher_as_base() {
        let v = evaluate(&cards(&[
            (Rank::Queen, Suit::Spades),
            (Rank::Queen, Suit::Hearts),
            (Rank::Queen, Suit::Diamonds),
            (Rank::Nine, Suit::Spades),
            (Rank::Nine, Suit::Hearts),
            (Rank::Nine, Suit::Clubs),
            (Rank::Two, Suit::Clubs),
        ]));
        assert_eq!(v.category, HandCategory::FullHouse);
        assert_eq!(v.tiebreak, vec![12, 9]);
    }

    #[test]
    fn four_of_a_kind_kicker_is_highest_remaining_card() {
        let v = evaluate(&cards(&[
            (Rank::Seven, Suit::Spades),
            (Rank::Seven, Suit::Hearts),
            (Rank::Seven, Suit::Diamonds),
            (Rank::Seven, Suit::Clubs),
            (Rank::Ace, Suit::Spades),
            (Rank::King, Suit::Hearts),
            (Rank::Two, Suit::Clubs),
        ]));
        assert_eq!(v.category, HandCategory::FourOfAKind);
        assert_eq!(v.tiebreak, vec![7, 14]);
    }

    #[test]
    fn flush_uses_top_five_suited_ranks() {
        let v = evaluate(&cards(&[
            (Rank::Ace, Suit::Clubs),
            (Rank::Jack, Suit::Clubs),
            (Rank::Nine, Suit::Clubs),
            (Rank::Six, Suit::Clubs),
            (Rank::Four, Suit::Clubs),
            (Rank::Two, Suit::Clubs),
            (Rank::King, Suit::Hearts),
        ]));
        assert_eq!(v.category, HandCategory::Flush);
        assert_eq!(v.tiebreak, vec![14, 11, 9, 6, 4]);
    }

    #[test]
    fn two_pair_picks_highest_two_and_kicker() {
        let v = evaluate(&cards(&[
            (Rank::Ten, Suit::Spades),
            (Rank::Ten, Suit::Hearts),
            (Rank::Six, Suit::Diamonds),
            (Rank::Six, Suit::Clubs),
            (Rank::Three, Suit::Spades),
            (Rank::Three, Suit::Hearts),
            (Rank::King, Suit::Clubs),
        ]));
        assert_eq!(v.category, HandCategory::TwoPair);
        assert_eq!(v.tiebreak, vec![10, 6, 13]);
    }

    #[test]
    fn suit_isomorphism_preserves_evaluation() {
        let swap = |s: Suit| match s {
            Suit::Spades => Suit::Clubs,
            Suit::Clubs => Suit::Spades,
            Suit::Hearts => Suit::Diamonds,
            Suit::Diamonds => Suit::Hearts,
        };

        let hands = [
            vec![
                (Rank::Ace, Suit::Spades),
                (Rank::King, Suit::Spades),
                (Rank::Queen, Suit::Spades),
                (Rank::Jack, Suit::Spades),
                (Rank::Ten, Suit::Spades),
                (Rank::Two, Suit::Hearts),
                (Rank::Three, Suit::Diamonds),
            ],
            vec![
                (Rank::Nine, Suit::Hearts),
                (Rank::Nine, Suit::Clubs),
                (Rank::Four, Suit::Diamonds),
                (Rank::Jack, Suit::Hearts),
                (Rank::Ten, Suit::Hearts),
                (Rank::Two, Suit::Hearts),
                (Rank::Seven, Suit::Hearts),
            ],
        ];

        for hand in hands {
            let original: Vec<Card> = hand.iter().map(|&(r, s)| Card::new(r, s)).collect();
            let swapped: Vec<Card> = hand.iter().map(|&(r, s)| Card::new(r, swap(s))).collect();
            assert_eq!(evaluate(&original), evaluate(&swapped));
        }
    }

    #[test]
    fn high_card_ordering_is_lexicographic() {
        let a = evaluate(&cards(&[
            (Rank::Ace, Suit::Spades),
            (Rank::Ten, Suit::Hearts),
            (Rank::Eight, Suit::Diamonds),
            (Rank::Six, Suit::Clubs),
            (Rank::Three, Suit::Spades),
        ]));
        let b = evaluate(&cards(&[
            (Rank::Ace, Suit::Hearts),
            (Rank::Ten, Suit::Spades),
            (Rank::Eight, Suit::Clubs),
            (Rank::Six, Suit::Diamonds),
            (Rank::Two, Suit::Spades),
        ]));
        assert_eq!(a.category, HandCategory::HighCard);
        assert!(a > b);
    }
}
