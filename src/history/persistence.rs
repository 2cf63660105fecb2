use std::fs;
use std::path::PathBuf;

use super::models::{HandHistory, HandRecord};
use crate::game::showdown::HandOutcome;

const APP_NAME: &str = "arcade-holdem";
const HISTORY_FILE: &str = "history.json";

/// Most recent hands kept on disk; older records roll off.
const KEEP_HANDS: usize = 500;

/// Best-effort hand-history store. Failures are logged and ignored: the
/// history file is a side channel, never load-bearing for the game.
pub struct HistoryStore {
    pub history: HandHistory,
    path: PathBuf,
}

impl HistoryStore {
    pub fn load_or_create() -> Self {
        let path = Self::history_path();

        let history = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(history) => history,
                    Err(e) => {
                        log::warn!("could not parse hand history, starting fresh: {}", e);
                        HandHistory::default()
                    }
                },
                Err(e) => {
                    log::warn!("could not read hand history, starting fresh: {}", e);
                    HandHistory::default()
                }
            }
        } else {
            HandHistory::default()
        };

        Self { history, path }
    }

    pub fn record(&mut self, outcome: &HandOutcome) {
        self.history.hands.push(HandRecord::from(outcome));
        if self.history.hands.len() > KEEP_HANDS {
            let overflow = self.history.hands.len() - KEEP_HANDS;
            self.history.hands.drain(..overflow);
        }
    }

    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("could not create history directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(&self.history) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("could not save hand history: {}", e);
                }
            }
            Err(e) => {
                log::warn!("could not serialize hand history: {}", e);
            }
        }
    }

    fn history_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(HISTORY_FILE)
    }
}
