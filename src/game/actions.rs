use serde::{Deserialize, Serialize};

/// A betting decision, as produced by the bot policy and applied by the
/// table engine. `Call` doubles as a check when nothing is owed; `RaiseTo`
/// carries the total target bet for the street, not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Call,
    RaiseTo(u32),
    AllIn,
}

impl Action {
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::RaiseTo(_) | Action::AllIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggression_split() {
        assert!(Action::RaiseTo(60).is_aggressive());
        assert!(Action::AllIn.is_aggressive());
        assert!(!Action::Fold.is_aggressive());
        assert!(!Action::Call.is_aggressive());
    }
}
