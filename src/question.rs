//! Question generation for the three drill kinds.
//!
//! Formula questions (pot odds, fold equity) pair the correct value with three
//! classic mistakes, drop any that would print the same percentage, and top
//! the list back up to four with near-miss values. Range-3 questions draw a
//! random spot and ask for its bucket.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::labels::{board_label, bucket_label, hand_label, seat_label, Lang};
use crate::math_engine::{
    bet_to_pot, bluff_breakeven, call_breakeven, call_share, clamp01, pot_share, to_pct_label,
};
use crate::range3::{
    classify_score, score, BoardTexture, HandClass, Seat, ALL_BOARD_TEXTURES, ALL_BUCKETS,
    ALL_HAND_CLASSES, ALL_SEATS,
};

pub const OPTION_COUNT: usize = 4;
pub const BET_FACTORS: [f64; 10] = [0.25, 0.33, 0.4, 0.5, 0.66, 0.75, 0.8, 1.0, 1.25, 1.5];
/// Half-width of the window near-miss distractors are drawn from.
pub const TWEAK_SPREAD: f64 = 0.1;
const MAX_RANDOM_TWEAKS: usize = 256;
const STEP_TWEAK: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "MIXED")]
    Mixed,
    #[serde(rename = "POT_ODDS")]
    PotOdds,
    #[serde(rename = "FE")]
    FoldEquity,
    #[serde(rename = "RANGE3")]
    Range3,
}

pub const ALL_MODES: [Mode; 4] = [Mode::Mixed, Mode::PotOdds, Mode::FoldEquity, Mode::Range3];

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Mixed => "mixed",
            Mode::PotOdds => "pot",
            Mode::FoldEquity => "fe",
            Mode::Range3 => "range3",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "mixed" | "mix" => Ok(Mode::Mixed),
            "pot" | "pot_odds" | "potodds" => Ok(Mode::PotOdds),
            "fe" | "fold_equity" => Ok(Mode::FoldEquity),
            "range3" | "r3" | "range" => Ok(Mode::Range3),
            other => Err(DrillError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "POT_ODDS")]
    PotOdds,
    #[serde(rename = "FE")]
    FoldEquity,
    #[serde(rename = "RANGE3")]
    Range3,
}

pub const ALL_KINDS: [QuestionKind; 3] =
    [QuestionKind::PotOdds, QuestionKind::FoldEquity, QuestionKind::Range3];

impl QuestionKind {
    fn id_prefix(self) -> &'static str {
        match self {
            QuestionKind::PotOdds => "POT",
            QuestionKind::FoldEquity => "FE",
            QuestionKind::Range3 => "R3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range3Meta {
    pub hand: HandClass,
    pub board: BoardTexture,
    pub position: Seat,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub qtype: QuestionKind,
    pub pot: u32,
    pub bet: u32,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    #[serde(default)]
    pub asked_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Range3Meta>,
}

impl Question {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(|s| s.as_str())
    }
}

/// One entry of a formula question's option list before shuffling.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: f64,
    pub label: String,
    pub is_correct: bool,
}

pub fn generate_pot_and_bet<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    let pot = (rng.gen::<f64>() * 90.0 + 10.0).round() as u32;
    let factor = BET_FACTORS[rng.gen_range(0..BET_FACTORS.len())];
    let bet = ((pot as f64 * factor).round() as u32).max(1);
    (pot, bet)
}

/// Builds four options with distinct labels. `values[0]` is the correct
/// answer and always survives; later values whose label repeats an earlier
/// one are dropped, and near-miss values around the answer fill the gaps.
pub fn distinct_options<R: Rng + ?Sized>(rng: &mut R, values: &[f64]) -> Vec<Candidate> {
    let mut unique: Vec<Candidate> = Vec::with_capacity(OPTION_COUNT);
    let Some(&correct) = values.first() else {
        return unique;
    };
    for (i, &value) in values.iter().enumerate() {
        let label = to_pct_label(value);
        if !unique.iter().any(|c| c.label == label) {
            unique.push(Candidate { value, label, is_correct: i == 0 });
        }
    }

    let mut attempts = 0;
    while unique.len() < OPTION_COUNT && attempts < MAX_RANDOM_TWEAKS {
        attempts += 1;
        let tweak = clamp01(correct + rng.gen_range(-TWEAK_SPREAD..TWEAK_SPREAD));
        push_if_new(&mut unique, tweak);
    }

    // Random draws can keep colliding when the answer sits at 0% or 100%.
    let mut step = 1;
    while unique.len() < OPTION_COUNT {
        for sign in [1.0, -1.0] {
            if unique.len() < OPTION_COUNT {
                push_if_new(&mut unique, clamp01(correct + sign * step as f64 * STEP_TWEAK));
            }
        }
        step += 1;
    }
    unique
}

fn push_if_new(unique: &mut Vec<Candidate>, value: f64) {
    let label = to_pct_label(value);
    if !unique.iter().any(|c| c.label == label) {
        unique.push(Candidate { value, label, is_correct: false });
    }
}

fn make_id(parts: &[String]) -> String {
    parts.join("|")
}

fn formula_question<R: Rng + ?Sized>(
    rng: &mut R,
    kind: QuestionKind,
    pot: u32,
    bet: u32,
    values: [f64; 4],
    lang: Lang,
    now_ms: u64,
) -> Question {
    let mut candidates = distinct_options(rng, &values);
    candidates.shuffle(rng);
    let correct_index = candidates.iter().position(|c| c.is_correct).unwrap_or(0);
    let options: Vec<String> = candidates.into_iter().map(|c| c.label).collect();

    let mut parts = vec![
        kind.id_prefix().to_string(),
        pot.to_string(),
        bet.to_string(),
    ];
    parts.extend(options.iter().cloned());

    Question {
        id: make_id(&parts),
        qtype: kind,
        pot,
        bet,
        explanation: formula_explanation(kind, pot, bet, values[0], lang),
        options,
        correct_index,
        asked_at: now_ms,
        meta: None,
    }
}

fn formula_explanation(kind: QuestionKind, pot: u32, bet: u32, correct: f64, lang: Lang) -> String {
    let pct = to_pct_label(correct);
    match (lang, kind) {
        (Lang::En, QuestionKind::FoldEquity) => format!(
            "Fold equity: break-even fold rate for a bluff = b / (p + b). p={}, b={}. The answer is {}.",
            pot, bet, pct
        ),
        (Lang::En, _) => format!(
            "Pot odds: equity needed to call = b / (p + 2b). p={}, b={}. The answer is {}.",
            pot, bet, pct
        ),
        (Lang::Ja, QuestionKind::FoldEquity) => format!(
            "フォールド・エクイティ: ブラフの損益分岐フォールド率 = b / (p + b)。p={}, b={}。正解は {}。",
            pot, bet, pct
        ),
        (Lang::Ja, _) => format!(
            "ポットオッズ: コールに必要なエクイティ = b / (p + 2b)。p={}, b={}。正解は {}。",
            pot, bet, pct
        ),
    }
}

pub fn gen_pot_odds_question<R: Rng + ?Sized>(rng: &mut R, lang: Lang, now_ms: u64) -> Question {
    let (pot, bet) = generate_pot_and_bet(rng);
    let (p, b) = (pot as f64, bet as f64);
    let values = [
        clamp01(call_breakeven(p, b)),
        clamp01(bluff_breakeven(p, b)),
        clamp01(call_share(p, b)),
        clamp01(bet_to_pot(p, b)),
    ];
    formula_question(rng, QuestionKind::PotOdds, pot, bet, values, lang, now_ms)
}

pub fn gen_fold_equity_question<R: Rng + ?Sized>(rng: &mut R, lang: Lang, now_ms: u64) -> Question {
    let (pot, bet) = generate_pot_and_bet(rng);
    let (p, b) = (pot as f64, bet as f64);
    let values = [
        clamp01(bluff_breakeven(p, b)),
        clamp01(call_breakeven(p, b)),
        clamp01(pot_share(p, b)),
        clamp01(bet_to_pot(p, b)),
    ];
    formula_question(rng, QuestionKind::FoldEquity, pot, bet, values, lang, now_ms)
}

pub fn gen_range3_question<R: Rng + ?Sized>(rng: &mut R, lang: Lang, now_ms: u64) -> Question {
    let hand = ALL_HAND_CLASSES[rng.gen_range(0..ALL_HAND_CLASSES.len())];
    let board = ALL_BOARD_TEXTURES[rng.gen_range(0..ALL_BOARD_TEXTURES.len())];
    let position = ALL_SEATS[rng.gen_range(0..ALL_SEATS.len())];
    let spot_score = score(hand, board, position);
    let bucket = classify_score(spot_score);

    let mut buckets = ALL_BUCKETS;
    buckets.shuffle(rng);
    let correct_index = buckets.iter().position(|b| *b == bucket).unwrap_or(0);
    let options = buckets.iter().map(|b| b.name().to_string()).collect();

    let explanation = match lang {
        Lang::En => format!(
            "Range 3: {} / {} ({}). Score {} -> {}.",
            hand_label(lang, hand),
            board_label(lang, board),
            seat_label(lang, position),
            spot_score,
            bucket_label(lang, bucket)
        ),
        Lang::Ja => format!(
            "レンジ3: {} / {}（{}）。スコア {} → {}。",
            hand_label(lang, hand),
            board_label(lang, board),
            seat_label(lang, position),
            spot_score,
            bucket_label(lang, bucket)
        ),
    };

    Question {
        id: make_id(&[
            QuestionKind::Range3.id_prefix().to_string(),
            hand.name().to_string(),
            board.name().to_string(),
            position.code().to_string(),
        ]),
        qtype: QuestionKind::Range3,
        pot: 0,
        bet: 0,
        options,
        correct_index,
        explanation,
        asked_at: now_ms,
        meta: Some(Range3Meta { hand, board, position, score: spot_score }),
    }
}

pub fn kind_for_mode<R: Rng + ?Sized>(mode: Mode, rng: &mut R) -> QuestionKind {
    match mode {
        Mode::Mixed => ALL_KINDS[rng.gen_range(0..ALL_KINDS.len())],
        Mode::PotOdds => QuestionKind::PotOdds,
        Mode::FoldEquity => QuestionKind::FoldEquity,
        Mode::Range3 => QuestionKind::Range3,
    }
}

pub fn new_question_for<R: Rng + ?Sized>(mode: Mode, rng: &mut R, lang: Lang, now_ms: u64) -> Question {
    match kind_for_mode(mode, rng) {
        QuestionKind::PotOdds => gen_pot_odds_question(rng, lang, now_ms),
        QuestionKind::FoldEquity => gen_fold_equity_question(rng, lang, now_ms),
        QuestionKind::Range3 => gen_range3_question(rng, lang, now_ms),
    }
}
