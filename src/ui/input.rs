use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::table::{Phase, Table};

/// What a keypress asks the application to do. Legality is re-checked by the
/// engine; stale requests fall through as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Fold,
    CallCheck,
    AllIn,
    RaiseSubmit,
    RaiseMin,
    RaisePot,
    RaiseStepUp,
    RaiseStepDown,
    Continue,
    Start,
    AddBot,
    RemoveBot,
    CycleDifficulty,
    ReturnToSetup,
    ToggleHelp,
    Quit,
}

pub fn handle_key(key: KeyEvent, table: &Table, raise_input: &mut String) -> Option<UiAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiAction::Quit);
    }

    match table.phase {
        Phase::Setup => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiAction::Quit),
            KeyCode::Char('+') | KeyCode::Right => Some(UiAction::AddBot),
            KeyCode::Char('-') | KeyCode::Left => Some(UiAction::RemoveBot),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Tab => {
                Some(UiAction::CycleDifficulty)
            }
            KeyCode::Enter => Some(UiAction::Start),
            _ => None,
        },

        Phase::RoundPause | Phase::HandDone => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiAction::Quit),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(UiAction::ReturnToSetup),
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiAction::Continue),
            _ => None,
        },

        Phase::Betting | Phase::BotPause => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(UiAction::Quit),
            KeyCode::Char('?') => Some(UiAction::ToggleHelp),

            KeyCode::Char('f') | KeyCode::Char('F') => Some(UiAction::Fold),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('x') | KeyCode::Char('X') => {
                Some(UiAction::CallCheck)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => Some(UiAction::AllIn),

            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                Some(UiAction::RaiseSubmit)
            }
            KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::RaisePot),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(UiAction::RaiseMin),
            KeyCode::Char('+') => Some(UiAction::RaiseStepUp),
            KeyCode::Char('-') => Some(UiAction::RaiseStepDown),

            KeyCode::Char(c) if c.is_ascii_digit() => {
                if raise_input.len() < 9 {
                    raise_input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                raise_input.pop();
                None
            }

            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::policy::Difficulty;
    use crate::game::table::TableConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup_table() -> Table {
        let mut table = Table::new(TableConfig::default());
        table.configure(2, Difficulty::Easy);
        table
    }

    #[test]
    fn setup_keys_adjust_the_lobby() {
        let table = setup_table();
        let mut input = String::new();
        assert_eq!(
            handle_key(key(KeyCode::Char('+')), &table, &mut input),
            Some(UiAction::AddBot)
        );
        assert_eq!(
            handle_key(key(KeyCode::Enter), &table, &mut input),
            Some(UiAction::Start)
        );
    }

    #[test]
    fn digits_accumulate_into_the_raise_entry() {
        let mut table = setup_table();
        table.begin_hand();
        let mut input = String::new();

        handle_key(key(KeyCode::Char('4')), &table, &mut input);
        handle_key(key(KeyCode::Char('0')), &table, &mut input);
        assert_eq!(input, "40");

        handle_key(key(KeyCode::Backspace), &table, &mut input);
        assert_eq!(input, "4");
    }
}
