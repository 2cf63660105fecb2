use crate::bot::policy::Difficulty;
use crate::game::table::{Table, TableConfig, MAX_BOTS};
use crate::history::persistence::HistoryStore;
use crate::ui::input::UiAction;

/// Top-level application state: the table, the hand-history store, and the
/// small amount of UI-only state (raise entry, overlays).
pub struct App {
    pub table: Table,
    pub history: HistoryStore,
    pub raise_input: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(num_bots: usize, difficulty: Difficulty, starting_stack: u32) -> Self {
        let config = TableConfig {
            num_bots,
            difficulty,
            starting_stack,
            ..TableConfig::default()
        };
        let mut table = Table::new(config);
        // seat the table up front so the setup screen reflects the CLI args
        table.configure(num_bots, difficulty);

        Self {
            table,
            history: HistoryStore::load_or_create(),
            raise_input: String::new(),
            show_help: false,
            should_quit: false,
        }
    }

    /// One tick of the cooperative loop: advance the engine, then drain the
    /// hand-history side channel.
    pub fn tick(&mut self, dt_ms: f32) {
        self.table.update(dt_ms);
        if let Some(outcome) = self.table.take_last_outcome() {
            self.history.record(&outcome);
        }
    }

    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Fold => self.table.fold(),
            UiAction::CallCheck => self.table.call_or_check(),
            UiAction::AllIn => self.table.all_in(),
            UiAction::RaiseSubmit => self.submit_raise(),
            UiAction::RaiseMin => self.raise_input = self.min_target().to_string(),
            UiAction::RaisePot => self.raise_input = self.pot_target().to_string(),
            UiAction::RaiseStepUp => self.step_raise(1),
            UiAction::RaiseStepDown => self.step_raise(-1),
            UiAction::Continue => {
                self.raise_input.clear();
                self.table.advance_after_pause();
            }
            UiAction::Start => self.table.begin_hand(),
            UiAction::AddBot => self.reseat(self.table.config.num_bots + 1),
            UiAction::RemoveBot => {
                self.reseat(self.table.config.num_bots.saturating_sub(1))
            }
            UiAction::CycleDifficulty => {
                let next = self.table.config.difficulty.next();
                self.reseat_with(self.table.config.num_bots, next);
            }
            UiAction::ReturnToSetup => self.table.return_to_setup(),
            UiAction::ToggleHelp => self.show_help = !self.show_help,
            UiAction::Quit => self.should_quit = true,
        }
    }

    fn reseat(&mut self, num_bots: usize) {
        let difficulty = self.table.config.difficulty;
        self.reseat_with(num_bots, difficulty);
    }

    fn reseat_with(&mut self, num_bots: usize, difficulty: Difficulty) {
        self.table.configure(num_bots.clamp(1, MAX_BOTS), difficulty);
    }

    // --- raise entry helpers (the keypad's legality rules) ---

    fn min_target(&self) -> u32 {
        let by_rule = self.table.current_bet + self.table.minimum_raise_amount();
        by_rule.max(self.table.current_bet + 1)
    }

    fn max_target(&self) -> u32 {
        let hero = self.table.hero;
        let seat = &self.table.seats[hero];
        if self.table.can_go_all_in() {
            seat.bet + seat.stack
        } else {
            self.table
                .pre_river_cap_target(hero, seat.bet + seat.stack.saturating_sub(1))
        }
    }

    fn pot_target(&self) -> u32 {
        let hero = self.table.hero;
        let seat = &self.table.seats[hero];
        let pot_sized = seat.bet + self.table.amount_to_call(hero) + self.table.pot;
        pot_sized.min(self.max_target()).max(self.min_target())
    }

    fn step_raise(&mut self, direction: i32) {
        let step = self.table.minimum_raise_amount();
        let current = self
            .raise_input
            .parse::<u32>()
            .unwrap_or_else(|_| self.min_target());
        let next = if direction > 0 {
            current.saturating_add(step).min(self.max_target())
        } else {
            current.saturating_sub(step).max(self.min_target())
        };
        self.raise_input = next.to_string();
    }

    fn submit_raise(&mut self) {
        if !self.table.is_humans_turn() {
            return;
        }

        // an empty entry submits the minimum legal raise, like the prefill
        let entered = self
            .raise_input
            .parse::<u32>()
            .unwrap_or_else(|_| self.min_target());
        self.raise_input.clear();

        let mut target = entered.max(self.min_target());
        if !self.table.can_go_all_in() {
            target = self.table.pre_river_cap_target(self.table.hero, target);
        }
        target = target.min(self.max_target());

        let to_call = self.table.amount_to_call(self.table.hero);
        if to_call > 0 && target <= self.table.current_bet {
            self.table.call_or_check();
        } else {
            self.table.raise_to(target);
        }
    }
}
