use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::strength::strength_estimate;
use crate::game::actions::Action;
use crate::game::deck::Card;
use crate::game::table::Street;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    fn profile(self) -> Profile {
        match self {
            Difficulty::Easy => Profile {
                fold_threshold: 0.30,
                raise_threshold: 0.60,
                bluff_chance: 0.02,
                raise_factor: 0.8,
                call_bias: 0.55,
            },
            Difficulty::Medium => Profile {
                fold_threshold: 0.22,
                raise_threshold: 0.50,
                bluff_chance: 0.07,
                raise_factor: 1.2,
                call_bias: 0.45,
            },
            Difficulty::Hard => Profile {
                fold_threshold: 0.14,
                raise_threshold: 0.38,
                bluff_chance: 0.14,
                raise_factor: 1.7,
                call_bias: 0.30,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// Aggression parameters for one difficulty tier.
struct Profile {
    fold_threshold: f64,
    raise_threshold: f64,
    bluff_chance: f64,
    raise_factor: f64,
    call_bias: f64,
}

/// Picks an action for an automated seat. Pure apart from the injected
/// random source; the engine clamps whatever comes back to the legal range.
#[allow(clippy::too_many_arguments)]
pub fn decide(
    rng: &mut impl Rng,
    difficulty: Difficulty,
    hole: &[Card],
    board: &[Card],
    stack: u32,
    pot: u32,
    to_call: u32,
    min_raise: u32,
    street: Street,
) -> Action {
    let strength = strength_estimate(hole, board);
    let profile = difficulty.profile();

    // big pots push both thresholds down: more folds of weak hands, more raises
    let pressure = (f64::from(pot) / 400.0).min(1.0);
    let fold_threshold = (profile.fold_threshold - 0.10 * pressure).max(0.05);
    let raise_threshold = (profile.raise_threshold - 0.05 * pressure).min(0.95);

    if rng.gen::<f64>() < profile.bluff_chance && f64::from(to_call) <= f64::from(pot) * 0.4 {
        let sized = (f64::from(pot) * 0.4 + strength * 80.0 * profile.raise_factor) as u32;
        return Action::RaiseTo(to_call + min_raise.max(sized));
    }

    if strength < fold_threshold && to_call > 0 {
        return Action::Fold;
    }

    let want_raise =
        strength > raise_threshold || (to_call == 0 && rng.gen::<f64>() > profile.call_bias);

    if want_raise {
        let sized = (f64::from(pot) * 0.3 + strength * 100.0 * profile.raise_factor) as u32;
        let target = to_call + min_raise.max(sized);

        let short_stacked = f64::from(stack) < 80.0_f64.max(f64::from(pot) * 0.6);
        let final_street = street >= Street::River;
        if (short_stacked || final_street) && rng.gen::<f64>() < 0.15 * profile.raise_factor {
            return Action::AllIn;
        }

        return Action::RaiseTo(target);
    }

    Action::Call
}
