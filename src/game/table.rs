use std::collections::BTreeSet;

use log::{debug, info};
use rand::{thread_rng, Rng};

use super::actions::Action;
use super::deck::{Card, Deck};
use super::seat::Seat;
use super::showdown::{self, HandOutcome, WinnerShare};
use crate::bot::policy::{self, Difficulty};

pub const STARTING_STACK: u32 = 500;
pub const SMALL_BLIND: u32 = 10;
pub const BIG_BLIND: u32 = 20;
pub const MAX_BOTS: usize = 7;

const BOT_THINK_MS: f32 = 900.0;
const BOT_POST_ACT_PAUSE_MS: f32 = 800.0;
const BANNER_MS: f32 = 1800.0;
const LOG_CAP: usize = 100;

/// Board stage of the current betting round. This variant deals the flop
/// before the first betting round, so `Flop` is the opening street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn label(&self) -> &'static str {
        match self {
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pre-game configuration; no hand is running.
    Setup,
    /// A seat owes an action.
    Betting,
    /// Short pause after an automated action before the next turn.
    BotPause,
    /// A street was revealed; waiting for the continue affordance.
    RoundPause,
    /// The hand is resolved; waiting for the continue affordance.
    HandDone,
}

#[derive(Debug, Clone)]
pub struct TableConfig {
    pub num_bots: usize,
    pub difficulty: Difficulty,
    pub starting_stack: u32,
    /// Restore the human's stack when busted, before the next hand.
    pub arcade_rebuy: bool,
    /// Reload bots that fell below one big blind at the start of a hand.
    pub auto_rebuy_bots: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_bots: 4,
            difficulty: Difficulty::Medium,
            starting_stack: STARTING_STACK,
            arcade_rebuy: true,
            auto_rebuy_bots: true,
        }
    }
}

/// The single table: seats, round state, and the betting state machine.
///
/// All monetary updates saturate; illegal or out-of-turn action requests are
/// no-ops (at most a transient banner), never errors.
pub struct Table {
    pub seats: Vec<Seat>,
    pub hero: usize,
    pub dealer: usize,
    pub current: usize,
    pub phase: Phase,
    pub street: Street,
    pub pot: u32,
    /// Highest committed bet this street.
    pub current_bet: u32,
    pub last_raiser: Option<usize>,
    pub last_raise_size: u32,
    pub pending_to_act: BTreeSet<usize>,
    pub hand_number: u32,
    /// All five board cards, drawn face-down at deal time.
    pub board_all: Vec<Card>,
    /// How many of `board_all` are revealed.
    pub board_visible: usize,
    pub log: Vec<String>,
    pub last_winner_text: String,
    /// True once a contested showdown has exposed the bots' hole cards.
    pub hole_cards_revealed: bool,
    pub config: TableConfig,
    last_outcome: Option<HandOutcome>,
    banner_text: String,
    banner_timer: f32,
    think_timer: f32,
    pause_timer: f32,
    deck: Deck,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        Self {
            seats: Vec::new(),
            hero: 0,
            dealer: 0,
            current: 0,
            phase: Phase::Setup,
            street: Street::Flop,
            pot: 0,
            current_bet: 0,
            last_raiser: None,
            last_raise_size: BIG_BLIND,
            pending_to_act: BTreeSet::new(),
            hand_number: 0,
            board_all: Vec::new(),
            board_visible: 0,
            log: Vec::new(),
            last_winner_text: String::new(),
            hole_cards_revealed: false,
            config,
            last_outcome: None,
            banner_text: String::new(),
            banner_timer: 0.0,
            think_timer: 0.0,
            pause_timer: 0.0,
            deck: Deck::shuffled(),
        }
    }

    // --- lifecycle ---

    /// Seats the human and `num_bots` bots with fresh stacks.
    pub fn configure(&mut self, num_bots: usize, difficulty: Difficulty) {
        let num_bots = num_bots.clamp(1, MAX_BOTS);
        self.config.num_bots = num_bots;
        self.config.difficulty = difficulty;

        let stack = self.config.starting_stack;
        self.seats = vec![Seat::human("You", stack)];
        for i in 0..num_bots {
            self.seats
                .push(Seat::bot(format!("Bot {}", i + 1), difficulty, stack));
        }
        self.hero = 0;
        self.dealer = 0;
        self.hand_number = 0;
    }

    pub fn begin_hand(&mut self) {
        if self.seats.len() < 2 {
            return;
        }

        if self.config.auto_rebuy_bots {
            let stack = self.config.starting_stack;
            for seat in self.seats.iter_mut().filter(|s| !s.is_human) {
                if seat.stack < BIG_BLIND {
                    seat.rebuy(stack);
                }
            }
        }

        for seat in &mut self.seats {
            seat.reset_for_hand();
        }

        self.hand_number += 1;
        self.street = Street::Flop;
        self.pot = 0;
        self.current_bet = 0;
        self.last_raiser = None;
        self.last_raise_size = BIG_BLIND;
        self.pending_to_act.clear();
        self.think_timer = 0.0;
        self.pause_timer = 0.0;
        self.banner_text.clear();
        self.banner_timer = 0.0;
        self.last_winner_text.clear();
        self.hole_cards_revealed = false;
        self.last_outcome = None;
        self.log.clear();

        self.deck = Deck::shuffled();

        // two hole cards each, one at a time, only to seats with chips
        for _ in 0..2 {
            for i in 0..self.seats.len() {
                if self.seats[i].stack > 0 {
                    if let Some(card) = self.deck.draw() {
                        self.seats[i].hole.push(card);
                    }
                }
            }
        }
        // a seat that was not dealt in sits this hand out
        for seat in &mut self.seats {
            if seat.hole.len() < 2 {
                seat.folded = true;
            }
        }

        // the whole board is pre-drawn; a visibility counter gates reveal
        self.board_all = self.deck.draw_n(5);
        self.board_visible = 3;

        self.post_blinds();

        self.current = (self.dealer + 3) % self.seats.len();
        self.start_street(self.current, true);

        self.phase = Phase::Betting;
        self.push_log(format!("New hand. Blinds {}/{}.", SMALL_BLIND, BIG_BLIND));
        self.dump_state("begin_hand");
    }

    fn post_blinds(&mut self) {
        let n = self.seats.len();
        let sb_seat = (self.dealer + 1) % n;
        let bb_seat = (self.dealer + 2) % n;

        let sb_paid = self.seats[sb_seat].pay(SMALL_BLIND);
        let bb_paid = self.seats[bb_seat].pay(BIG_BLIND);
        for &i in &[sb_seat, bb_seat] {
            // a short stack posts an all-in blind
            if self.seats[i].stack == 0 && self.seats[i].bet > 0 {
                self.seats[i].all_in = true;
            }
        }

        self.pot += sb_paid + bb_paid;
        self.current_bet = bb_paid;
        self.last_raiser = Some(bb_seat);
        self.last_raise_size = BIG_BLIND;

        let sb_name = self.seats[sb_seat].name.clone();
        let bb_name = self.seats[bb_seat].name.clone();
        self.push_log(format!("{} posts the small blind ({}).", sb_name, sb_paid));
        self.push_log(format!("{} posts the big blind ({}).", bb_name, bb_paid));
    }

    /// Continue affordance: leaves a street reveal pause, or starts the next
    /// hand once the previous one is resolved.
    pub fn advance_after_pause(&mut self) {
        match self.phase {
            Phase::RoundPause => {
                self.phase = Phase::Betting;
                self.dump_state("continue_betting");
            }
            Phase::HandDone => {
                self.dealer = (self.dealer + 1) % self.seats.len();
                if self.config.arcade_rebuy && self.seats[self.hero].stack == 0 {
                    let stack = self.config.starting_stack;
                    self.seats[self.hero].rebuy(stack);
                    info!("automatic rebuy for {}", self.seats[self.hero].name);
                }
                self.begin_hand();
            }
            _ => {}
        }
    }

    pub fn return_to_setup(&mut self) {
        self.phase = Phase::Setup;
        self.banner_text.clear();
        self.banner_timer = 0.0;
        self.log.clear();
        self.last_winner_text.clear();
    }

    /// Hand-history side channel: the outcome of the last resolved hand,
    /// consumed at most once.
    pub fn take_last_outcome(&mut self) -> Option<HandOutcome> {
        self.last_outcome.take()
    }

    // --- betting engine core ---

    fn eligible_for_street(&self) -> BTreeSet<usize> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.folded && !s.all_in && s.stack > 0)
            .map(|(i, _)| i)
            .collect()
    }

    fn start_street(&mut self, first: usize, opening: bool) {
        if opening {
            // blinds stay posted; the big blind has already acted by posting
            let mut pending = self.eligible_for_street();
            if let Some(raiser) = self.last_raiser {
                pending.remove(&raiser);
            }
            self.pending_to_act = pending;
        } else {
            for seat in &mut self.seats {
                if !seat.all_in {
                    seat.bet = 0;
                }
            }
            self.current_bet = 0;
            self.last_raiser = None;
            self.pending_to_act = self.eligible_for_street();
        }

        let n = self.seats.len();
        self.current = self.next_in_pending_from((first + n - 1) % n);
    }

    fn next_in_pending_from(&self, start: usize) -> usize {
        if self.pending_to_act.is_empty() {
            return start;
        }
        let n = self.seats.len();
        for step in 1..=n {
            let j = (start + step) % n;
            if self.pending_to_act.contains(&j) {
                return j;
            }
        }
        start
    }

    pub fn amount_to_call(&self, idx: usize) -> u32 {
        self.current_bet.saturating_sub(self.seats[idx].bet)
    }

    pub fn minimum_raise_amount(&self) -> u32 {
        if self.current_bet == 0 {
            BIG_BLIND
        } else {
            self.last_raise_size.max(BIG_BLIND)
        }
    }

    fn only_one_left(&self) -> bool {
        self.seats.iter().filter(|s| !s.folded).count() == 1
    }

    /// All-in (and uncapped raising) is only permitted once the final
    /// street's board is fully revealed.
    pub fn can_go_all_in(&self) -> bool {
        self.street == Street::River
            && matches!(self.phase, Phase::Betting | Phase::BotPause)
            && self.board_visible == 5
    }

    /// House rule: before the river, raise targets are capped so nobody can
    /// shove, and a raise may not leave the raiser with less than one big
    /// blind. The lower bound wins when the caps cross.
    pub fn pre_river_cap_target(&self, idx: usize, proposed: u32) -> u32 {
        if self.can_go_all_in() {
            return proposed;
        }
        let seat = &self.seats[idx];
        let to_call = self.amount_to_call(idx);

        let cap_by_rule = seat.bet + to_call + self.pot.min(4 * BIG_BLIND);
        let cap_by_floor = seat.bet + seat.stack.saturating_sub(BIG_BLIND);
        let legal_max = self.current_bet.max(cap_by_rule.min(cap_by_floor));
        let legal_min = self.current_bet + 1;
        proposed.min(legal_max).max(legal_min)
    }

    fn mark_passive(&mut self, idx: usize) {
        self.pending_to_act.remove(&idx);
    }

    /// A bet that raised the table bet re-opens the action: everyone still
    /// live and short of the new level owes a decision again.
    fn mark_aggressive(&mut self, idx: usize) {
        self.last_raiser = Some(idx);
        self.pending_to_act = self
            .seats
            .iter()
            .enumerate()
            .filter(|&(i, s)| i != idx && !s.folded && !s.all_in && s.bet < self.current_bet)
            .map(|(i, _)| i)
            .collect();
    }

    fn street_should_end(&self) -> bool {
        if self.pending_to_act.is_empty() {
            return true;
        }
        let mut live = self.seats.iter().filter(|s| !s.folded).peekable();
        live.peek().is_some() && live.all(|s| s.all_in)
    }

    /// Advances exactly one board stage. Chains of automatic advances pass
    /// through `RoundPause` and re-enter from `update`, so this can never
    /// recurse into itself.
    fn advance_street(&mut self) {
        match self.street {
            Street::Flop => {
                self.board_visible = self.board_visible.max(4);
                self.street = Street::Turn;
                let first = (self.dealer + 1) % self.seats.len();
                self.start_street(first, false);
                self.phase = Phase::RoundPause;
                self.dump_state("turn_revealed");
            }
            Street::Turn => {
                self.board_visible = self.board_visible.max(5);
                self.street = Street::River;
                let first = (self.dealer + 1) % self.seats.len();
                self.start_street(first, false);
                self.phase = Phase::RoundPause;
                self.dump_state("river_revealed");
            }
            Street::River | Street::Showdown => {
                self.street = Street::Showdown;
                self.resolve_showdown();
            }
        }
    }

    fn settle_after_action(&mut self) {
        if self.only_one_left() {
            self.street = Street::Showdown;
            self.resolve_showdown();
            return;
        }
        if self.street_should_end() {
            self.advance_street();
            return;
        }
        self.current = self.next_in_pending_from(self.current);
        self.dump_state("after_action");
    }

    // --- human actions (no-ops when illegal or out of turn) ---

    fn human_can_act(&self) -> bool {
        matches!(self.phase, Phase::Betting | Phase::BotPause)
    }

    pub fn is_humans_turn(&self) -> bool {
        self.human_can_act()
            && self.current == self.hero
            && self.pending_to_act.contains(&self.hero)
    }

    pub fn fold(&mut self) {
        if !self.human_can_act() {
            return;
        }
        let idx = self.current;
        let seat = &self.seats[idx];
        if !seat.is_human || seat.folded || seat.all_in {
            return;
        }
        if !self.pending_to_act.contains(&idx) {
            return;
        }

        self.seats[idx].folded = true;
        self.announce(idx, "folds");
        self.mark_passive(idx);
        self.settle_after_action();
    }

    pub fn call_or_check(&mut self) {
        if !self.human_can_act() {
            return;
        }
        let idx = self.current;
        let seat = &self.seats[idx];
        if !seat.is_human || seat.folded || seat.all_in {
            return;
        }

        let to_call = self.amount_to_call(idx);
        if to_call > 0 && !self.pending_to_act.contains(&idx) {
            return;
        }

        if !self.can_go_all_in() && to_call > 0 {
            let seat = &self.seats[idx];
            if seat.stack - to_call.min(seat.stack) < BIG_BLIND {
                self.show_banner(format!(
                    "Cannot drop below {} before the river.",
                    BIG_BLIND
                ));
                return;
            }
        }

        let paid = self.seats[idx].pay(to_call);
        self.pot += paid;
        if self.seats[idx].stack == 0 && to_call > 0 {
            self.seats[idx].all_in = true;
        }

        self.announce(idx, if to_call > 0 { "calls" } else { "checks" });
        self.mark_passive(idx);
        self.settle_after_action();
    }

    pub fn raise_to(&mut self, target_total: u32) {
        if !self.human_can_act() {
            return;
        }
        let idx = self.current;
        let seat = &self.seats[idx];
        if !seat.is_human || seat.folded || seat.all_in || seat.stack == 0 {
            return;
        }
        if !self.pending_to_act.contains(&idx) {
            return;
        }

        if target_total <= self.current_bet {
            return self.call_or_check();
        }

        let mut target_total = target_total;
        if !self.can_go_all_in() {
            target_total = self.pre_river_cap_target(idx, target_total);
        }

        // a short target is clamped up to exactly the minimum legal raise
        let min_raise = self.minimum_raise_amount();
        if target_total - self.current_bet < min_raise {
            target_total = self.current_bet + min_raise;
        }

        let need = target_total.saturating_sub(self.seats[idx].bet);
        if need == 0 {
            return self.call_or_check();
        }

        let prev_level = self.current_bet;
        let paid = self.seats[idx].pay(need);
        if paid == 0 {
            return;
        }
        self.pot += paid;

        if self.seats[idx].bet > self.current_bet {
            self.current_bet = self.seats[idx].bet;
            let increment = self.current_bet - prev_level;
            // a short all-in raise must not shrink the standing minimum
            if increment >= self.minimum_raise_amount() {
                self.last_raise_size = increment;
            }
            if self.seats[idx].stack == 0 {
                self.seats[idx].all_in = true;
            }
            let line = format!("raises to {}", self.seats[idx].bet);
            self.announce(idx, &line);
            self.mark_aggressive(idx);
        } else {
            self.announce(idx, "calls");
            self.mark_passive(idx);
        }
        self.settle_after_action();
    }

    pub fn all_in(&mut self) {
        if !self.human_can_act() {
            return;
        }
        if !self.can_go_all_in() {
            self.show_banner("All-in is only allowed on the final street.".to_string());
            return;
        }
        let idx = self.current;
        let seat = &self.seats[idx];
        if !seat.is_human || seat.folded || seat.all_in || seat.stack == 0 {
            return;
        }
        if !self.pending_to_act.contains(&idx) {
            return;
        }

        let total = self.seats[idx].stack;
        let paid = self.seats[idx].pay(total);
        self.pot += paid;
        self.seats[idx].all_in = true;

        let prev_level = self.current_bet;
        if self.seats[idx].bet > self.current_bet {
            self.current_bet = self.seats[idx].bet;
            self.last_raise_size = self.last_raise_size.max(self.current_bet - prev_level);
            self.mark_aggressive(idx);
        } else {
            self.mark_passive(idx);
        }

        self.announce(idx, "goes all-in");
        self.settle_after_action();
    }

    // --- tick driver ---

    /// Advances the table by one tick of `dt_ms` milliseconds: banner decay,
    /// post-action pauses, and automated turns. Does nothing in `Setup`,
    /// `RoundPause`, and `HandDone`.
    pub fn update(&mut self, dt_ms: f32) {
        if self.banner_timer > 0.0 {
            self.banner_timer = (self.banner_timer - dt_ms).max(0.0);
        }

        match self.phase {
            Phase::BotPause => {
                self.pause_timer -= dt_ms;
                if self.pause_timer <= 0.0 {
                    self.phase = Phase::Betting;
                }
            }
            Phase::Betting => self.bot_take_turn_if_needed(dt_ms),
            _ => {}
        }
    }

    fn bot_take_turn_if_needed(&mut self, dt_ms: f32) {
        if self.street_should_end() {
            self.advance_street();
            return;
        }

        if !self.pending_to_act.contains(&self.current) {
            self.current = self.next_in_pending_from(self.current);
            if self.street_should_end() {
                self.advance_street();
            }
            return;
        }

        let idx = self.current;
        if self.seats[idx].is_human {
            return;
        }
        if self.seats[idx].folded || self.seats[idx].all_in {
            self.pending_to_act.remove(&idx);
            if self.street_should_end() {
                self.advance_street();
            } else {
                self.current = self.next_in_pending_from(idx);
            }
            return;
        }

        // "thinking…" delay, randomized per decision
        if self.think_timer <= 0.0 {
            self.think_timer = BOT_THINK_MS * (0.8 + thread_rng().gen::<f32>() * 0.6);
            let name = self.seats[idx].name.clone();
            self.show_banner(format!("{}: thinking…", name));
            return;
        }
        self.think_timer -= dt_ms;
        if self.think_timer > 0.0 {
            return;
        }

        let hole = self.seats[idx].hole.clone();
        let board = self.board().to_vec();
        let difficulty = self.seats[idx]
            .difficulty
            .unwrap_or(self.config.difficulty);
        let action = policy::decide(
            &mut thread_rng(),
            difficulty,
            &hole,
            &board,
            self.seats[idx].stack,
            self.pot,
            self.amount_to_call(idx),
            self.minimum_raise_amount(),
            self.street,
        );

        self.apply_bot_action(idx, action);
        self.think_timer = 0.0;
        self.settle_after_action();

        if matches!(self.phase, Phase::Betting | Phase::BotPause) {
            self.phase = Phase::BotPause;
            self.pause_timer = BOT_POST_ACT_PAUSE_MS;
        }
    }

    fn apply_bot_action(&mut self, idx: usize, action: Action) {
        let to_call = self.amount_to_call(idx);
        let allin_allowed = self.can_go_all_in();

        // before the river, an all-in intent degrades to a capped raise, or
        // to a call when the cap leaves nothing to raise
        let action = if action == Action::AllIn && !allin_allowed {
            let seat = &self.seats[idx];
            let capped =
                self.pre_river_cap_target(idx, seat.bet + seat.stack.saturating_sub(1));
            if capped > self.current_bet.max(self.seats[idx].bet) {
                Action::RaiseTo(capped)
            } else {
                Action::Call
            }
        } else {
            action
        };

        match action {
            Action::Fold => {
                self.seats[idx].folded = true;
                self.announce(idx, "folds");
                self.mark_passive(idx);
            }
            Action::Call => {
                let seat = &self.seats[idx];
                if !allin_allowed
                    && to_call > 0
                    && seat.stack - to_call.min(seat.stack) < BIG_BLIND
                {
                    // calling would leave less than a blind behind: muck
                    self.seats[idx].folded = true;
                    self.announce(idx, "folds");
                    self.mark_passive(idx);
                } else {
                    let paid = self.seats[idx].pay(to_call);
                    self.pot += paid;
                    if self.seats[idx].stack == 0 && to_call > 0 {
                        self.seats[idx].all_in = true;
                    }
                    self.announce(idx, if to_call > 0 { "calls" } else { "checks" });
                    self.mark_passive(idx);
                }
            }
            Action::AllIn => {
                let total = self.seats[idx].stack;
                let paid = self.seats[idx].pay(total);
                self.pot += paid;
                self.seats[idx].all_in = true;

                let prev_level = self.current_bet;
                if self.seats[idx].bet > self.current_bet {
                    self.current_bet = self.seats[idx].bet;
                    self.last_raise_size =
                        self.last_raise_size.max(self.current_bet - prev_level);
                    self.mark_aggressive(idx);
                } else {
                    self.mark_passive(idx);
                }
                self.announce(idx, "goes all-in");
            }
            Action::RaiseTo(target) => {
                let target = if allin_allowed {
                    target
                } else {
                    self.pre_river_cap_target(idx, target)
                };
                let need = target
                    .saturating_sub(self.seats[idx].bet)
                    .min(self.seats[idx].stack);
                if need == 0 {
                    self.announce(idx, if to_call == 0 { "checks" } else { "calls" });
                    self.mark_passive(idx);
                    return;
                }

                let prev_level = self.current_bet;
                let paid = self.seats[idx].pay(need);
                self.pot += paid;

                if self.seats[idx].bet > self.current_bet {
                    self.current_bet = self.seats[idx].bet;
                    let increment = self.current_bet - prev_level;
                    if increment >= self.minimum_raise_amount() {
                        self.last_raise_size = increment;
                    }
                    if self.seats[idx].stack == 0 {
                        self.seats[idx].all_in = true;
                    }
                    let line = format!("raises to {}", self.seats[idx].bet);
                    self.announce(idx, &line);
                    self.mark_aggressive(idx);
                } else {
                    self.announce(idx, "calls");
                    self.mark_passive(idx);
                }
            }
        }
    }

    // --- showdown ---

    fn resolve_showdown(&mut self) {
        let pot = self.pot;
        let board: Vec<Card> = self.board_all[..self.board_visible].to_vec();
        let resolution = showdown::resolve(&mut self.seats, &board, pot);

        if resolution.contested {
            for (i, value) in &resolution.revealed {
                let seat = &self.seats[*i];
                let line = format!(
                    "{} shows {} {} ({}).",
                    seat.name,
                    seat.hole[0],
                    seat.hole[1],
                    value.describe()
                );
                self.push_log(line);
            }
        }

        let names: Vec<&str> = resolution
            .winners
            .iter()
            .map(|&w| self.seats[w].name.as_str())
            .collect();
        let names = names.join(", ");
        let difficulty = self.config.difficulty;

        let message = if !resolution.contested {
            format!("{} wins the pot uncontested (${}).  [{}]", names, pot, difficulty)
        } else if resolution.winners.len() == 1 {
            format!("{} wins ${}.  [{}]", names, pot, difficulty)
        } else {
            format!("Split pot between {}. ${} divided.  [{}]", names, pot, difficulty)
        };

        self.push_log(message.clone());
        self.show_banner(message.clone());
        self.last_winner_text = message;
        self.hole_cards_revealed = resolution.contested;

        self.last_outcome = Some(HandOutcome {
            hand_number: self.hand_number,
            pot,
            board,
            winners: resolution
                .winners
                .iter()
                .zip(&resolution.shares)
                .map(|(&w, &amount)| WinnerShare {
                    name: self.seats[w].name.clone(),
                    amount,
                })
                .collect(),
            contested: resolution.contested,
        });

        self.pot = 0;
        self.phase = Phase::HandDone;
        self.dump_state("after_showdown");
    }

    // --- queries / feedback ---

    pub fn board(&self) -> &[Card] {
        &self.board_all[..self.board_visible.min(self.board_all.len())]
    }

    pub fn banner(&self) -> Option<&str> {
        if self.banner_timer > 0.0 && !self.banner_text.is_empty() {
            Some(&self.banner_text)
        } else {
            None
        }
    }

    pub fn show_banner(&mut self, text: String) {
        self.banner_text = text;
        self.banner_timer = BANNER_MS;
    }

    fn announce(&mut self, idx: usize, label: &str) {
        let name = self.seats[idx].name.clone();
        self.show_banner(format!("{}: {}", name, label));
        self.push_log(format!("{}: {}.", name, label));
    }

    fn push_log(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        info!("[{}] {}", self.street.label(), msg);
        self.log.push(msg);
        if self.log.len() > LOG_CAP {
            self.log.drain(..LOG_CAP / 2);
        }
    }

    fn dump_state(&self, tag: &str) {
        let stacks: Vec<u32> = self.seats.iter().map(|s| s.stack).collect();
        let bets: Vec<u32> = self.seats.iter().map(|s| s.bet).collect();
        debug!(
            "[{}] street={} phase={:?} pot={} current_bet={} current={} stacks={:?} bets={:?} pending={:?}",
            tag,
            self.street.label(),
            self.phase,
            self.pot,
            self.current_bet,
            self.current,
            stacks,
            bets,
            self.pending_to_act,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn betting_table(stacks: &[u32]) -> Table {
        let mut table = Table::new(TableConfig::default());
        table.configure(stacks.len() - 1, Difficulty::Medium);
        for (seat, &stack) in table.seats.iter_mut().zip(stacks) {
            seat.stack = stack;
        }
        table.begin_hand();
        table
    }

    #[test]
    fn blinds_and_first_to_act_heads_up() {
        let table = betting_table(&[500, 500]);
        let n = table.seats.len();
        let sb = (table.dealer + 1) % n;
        let bb = (table.dealer + 2) % n;

        assert_eq!(table.seats[sb].bet, SMALL_BLIND);
        assert_eq!(table.seats[bb].bet, BIG_BLIND);
        assert_eq!(table.pot, SMALL_BLIND + BIG_BLIND);
        assert_eq!(table.current_bet, BIG_BLIND);
        // heads-up, "three after the dealer" wraps to the small blind
        assert_eq!(table.current, sb);
        assert!(table.pending_to_act.contains(&sb));
        assert!(!table.pending_to_act.contains(&bb));
    }

    #[test]
    fn big_blind_rejoins_pending_after_a_raise() {
        let mut table = betting_table(&[500, 500, 500]);
        let bb = (table.dealer + 2) % 3;
        assert!(!table.pending_to_act.contains(&bb));

        // simulate a raise from the current seat re-opening the action
        let raiser = table.current;
        let target = table.current_bet + table.minimum_raise_amount();
        let need = target - table.seats[raiser].bet;
        let paid = table.seats[raiser].pay(need);
        table.pot += paid;
        table.current_bet = table.seats[raiser].bet;
        table.mark_aggressive(raiser);

        assert!(table.pending_to_act.contains(&bb));
        assert!(!table.pending_to_act.contains(&raiser));
    }

    #[test]
    fn minimum_raise_tracks_last_raise_size() {
        let mut table = betting_table(&[500, 500]);
        assert_eq!(table.minimum_raise_amount(), BIG_BLIND);
        table.last_raise_size = 60;
        assert_eq!(table.minimum_raise_amount(), 60);
        // unopened street falls back to the big blind
        table.current_bet = 0;
        assert_eq!(table.minimum_raise_amount(), BIG_BLIND);
    }

    #[test]
    fn pre_river_cap_limits_raise_targets() {
        let mut table = betting_table(&[500, 500, 500]);
        table.phase = Phase::Betting;
        assert_eq!(table.street, Street::Flop);
        assert!(!table.can_go_all_in());

        let idx = table.current;
        let seat_bet = table.seats[idx].bet;
        let to_call = table.amount_to_call(idx);
        let cap_by_rule = seat_bet + to_call + table.pot.min(4 * BIG_BLIND);
        let cap_by_floor = seat_bet + table.seats[idx].stack - BIG_BLIND;
        let legal_max = table.current_bet.max(cap_by_rule.min(cap_by_floor));

        assert_eq!(table.pre_river_cap_target(idx, 10_000), legal_max);
        // and never below current_bet + 1
        assert_eq!(table.pre_river_cap_target(idx, 0), table.current_bet + 1);
    }

    #[test]
    fn all_in_only_on_the_river() {
        let mut table = betting_table(&[500, 500]);
        assert!(!table.can_go_all_in());
        table.street = Street::River;
        table.board_visible = 5;
        table.phase = Phase::Betting;
        assert!(table.can_go_all_in());
    }

    #[test]
    fn out_of_turn_requests_are_no_ops() {
        let mut table = betting_table(&[500, 500, 500]);
        // force a bot to be on turn
        if table.seats[table.current].is_human {
            table.current = (table.current + 1) % 3;
        }
        let pot = table.pot;
        let stacks: Vec<u32> = table.seats.iter().map(|s| s.stack).collect();

        table.fold();
        table.call_or_check();
        table.raise_to(200);
        table.all_in();

        assert_eq!(table.pot, pot);
        assert_eq!(
            stacks,
            table.seats.iter().map(|s| s.stack).collect::<Vec<u32>>()
        );
    }
}
