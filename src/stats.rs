use serde::{Deserialize, Serialize};

pub const BASE_POINTS: u64 = 100;
pub const COMBO_STEP: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(deserialize_with = "crate::storage::de_count")]
    pub answered: u64,
    #[serde(deserialize_with = "crate::storage::de_count")]
    pub correct: u64,
    pub total_ms: f64,
}

impl Stats {
    pub fn record(&mut self, correct: bool, elapsed_ms: u64) {
        self.answered += 1;
        if correct {
            self.correct += 1;
        }
        self.total_ms += elapsed_ms as f64;
    }

    /// Fraction answered correctly, 0 before the first answer.
    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.correct as f64 / self.answered as f64
        }
    }

    pub fn avg_ms(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.total_ms / self.answered as f64
        }
    }
}

pub fn speed_bonus(elapsed_ms: u64) -> u64 {
    let sec = elapsed_ms as f64 / 1000.0;
    if sec <= 2.0 {
        50
    } else if sec <= 5.0 {
        25
    } else if sec <= 10.0 {
        10
    } else {
        0
    }
}

/// Bonus for extending a streak; the first two answers of a run earn none.
pub fn combo_bonus(streak_before: u64) -> u64 {
    (streak_before + 1).saturating_sub(2) * COMBO_STEP
}

pub fn points_for(elapsed_ms: u64, streak_before: u64) -> u64 {
    BASE_POINTS + speed_bonus(elapsed_ms) + combo_bonus(streak_before)
}
