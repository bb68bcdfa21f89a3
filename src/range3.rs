//! Range-3 drill: bucket a made hand or draw into Strong / Medium / Weak
//! given the flop texture and whether hero is in position.
//!
//! The score is additive: the hand class has a base value, the board texture
//! shifts it up or down, and playing in position adds a small bonus. The
//! result is clamped to `0..=100` before bucketing.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::cards::{parse_board, parse_card_face, Card, CardFace};

pub const STRONG_THRESHOLD: i32 = 70;
pub const MEDIUM_THRESHOLD: i32 = 45;
pub const IP_BONUS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandClass {
    #[serde(rename = "Set/Trips")]
    SetTrips,
    #[serde(rename = "Two Pair")]
    TwoPair,
    #[serde(rename = "Overpair")]
    Overpair,
    #[serde(rename = "Top Pair Top Kicker")]
    TopPairTopKicker,
    #[serde(rename = "Top Pair Weak Kicker")]
    TopPairWeakKicker,
    #[serde(rename = "Second Pair")]
    SecondPair,
    #[serde(rename = "Underpair")]
    Underpair,
    #[serde(rename = "Nut FD + Overcards")]
    NutFlushDrawOvercards,
    #[serde(rename = "Strong Draw (OESD/NFD)")]
    StrongDraw,
    #[serde(rename = "Weak Draw (GS/BDFD)")]
    WeakDraw,
    #[serde(rename = "Air/Backdoors")]
    Air,
}

pub const ALL_HAND_CLASSES: [HandClass; 11] = [
    HandClass::SetTrips,
    HandClass::TwoPair,
    HandClass::Overpair,
    HandClass::TopPairTopKicker,
    HandClass::TopPairWeakKicker,
    HandClass::SecondPair,
    HandClass::Underpair,
    HandClass::NutFlushDrawOvercards,
    HandClass::StrongDraw,
    HandClass::WeakDraw,
    HandClass::Air,
];

impl HandClass {
    pub fn name(self) -> &'static str {
        match self {
            HandClass::SetTrips => "Set/Trips",
            HandClass::TwoPair => "Two Pair",
            HandClass::Overpair => "Overpair",
            HandClass::TopPairTopKicker => "Top Pair Top Kicker",
            HandClass::TopPairWeakKicker => "Top Pair Weak Kicker",
            HandClass::SecondPair => "Second Pair",
            HandClass::Underpair => "Underpair",
            HandClass::NutFlushDrawOvercards => "Nut FD + Overcards",
            HandClass::StrongDraw => "Strong Draw (OESD/NFD)",
            HandClass::WeakDraw => "Weak Draw (GS/BDFD)",
            HandClass::Air => "Air/Backdoors",
        }
    }

    pub fn base_score(self) -> i32 {
        match self {
            HandClass::SetTrips => 95,
            HandClass::TwoPair => 90,
            HandClass::Overpair => 78,
            HandClass::TopPairTopKicker => 82,
            HandClass::TopPairWeakKicker => 72,
            HandClass::SecondPair => 55,
            HandClass::Underpair => 35,
            HandClass::NutFlushDrawOvercards => 75,
            HandClass::StrongDraw => 68,
            HandClass::WeakDraw => 45,
            HandClass::Air => 20,
        }
    }

    pub fn is_top_pair(self) -> bool {
        matches!(self, HandClass::TopPairTopKicker | HandClass::TopPairWeakKicker)
    }

    /// Straight/flush draw classes. The nut flush draw with overcards plays
    /// as a made-hand hybrid and is not counted.
    pub fn is_draw(self) -> bool {
        matches!(self, HandClass::StrongDraw | HandClass::WeakDraw)
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardTexture {
    #[serde(rename = "Dry High (A72r)")]
    DryHigh,
    #[serde(rename = "Wet (T98hh)")]
    Wet,
    #[serde(rename = "Paired (KK2r)")]
    Paired,
    #[serde(rename = "Low Connected (654ss)")]
    LowConnected,
}

pub const ALL_BOARD_TEXTURES: [BoardTexture; 4] = [
    BoardTexture::DryHigh,
    BoardTexture::Wet,
    BoardTexture::Paired,
    BoardTexture::LowConnected,
];

impl BoardTexture {
    pub fn name(self) -> &'static str {
        match self {
            BoardTexture::DryHigh => "Dry High (A72r)",
            BoardTexture::Wet => "Wet (T98hh)",
            BoardTexture::Paired => "Paired (KK2r)",
            BoardTexture::LowConnected => "Low Connected (654ss)",
        }
    }

    /// How much this texture moves a hand class's score.
    pub fn effect(self, hand: HandClass) -> i32 {
        match self {
            BoardTexture::DryHigh => {
                if hand.is_top_pair() {
                    6
                } else if hand == HandClass::Overpair {
                    5
                } else if hand == HandClass::StrongDraw {
                    -8
                } else if hand == HandClass::WeakDraw {
                    -5
                } else {
                    0
                }
            }
            BoardTexture::Wet => {
                if hand.is_draw() {
                    10
                } else if hand.is_top_pair() {
                    -10
                } else if hand == HandClass::Overpair {
                    -8
                } else {
                    0
                }
            }
            BoardTexture::Paired => match hand {
                HandClass::SetTrips => 10,
                HandClass::TwoPair => 5,
                h if h.is_draw() => -5,
                _ => 0,
            },
            BoardTexture::LowConnected => match hand {
                HandClass::StrongDraw => 8,
                HandClass::Underpair => -5,
                _ => 0,
            },
        }
    }

    pub fn sample_codes(self) -> [&'static str; 3] {
        match self {
            BoardTexture::DryHigh => ["As", "7d", "2c"],
            BoardTexture::Wet => ["Th", "9h", "8c"],
            BoardTexture::Paired => ["Kd", "Kc", "2s"],
            BoardTexture::LowConnected => ["6s", "5s", "4d"],
        }
    }
}

impl fmt::Display for BoardTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hero's position relative to the villain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[serde(rename = "IP")]
    InPosition,
    #[serde(rename = "OOP")]
    OutOfPosition,
}

pub const ALL_SEATS: [Seat; 2] = [Seat::InPosition, Seat::OutOfPosition];

impl Seat {
    pub fn code(self) -> &'static str {
        match self {
            Seat::InPosition => "IP",
            Seat::OutOfPosition => "OOP",
        }
    }

    pub fn bonus(self) -> i32 {
        match self {
            Seat::InPosition => IP_BONUS,
            Seat::OutOfPosition => 0,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Strong,
    Medium,
    Weak,
}

/// Option order before shuffling.
pub const ALL_BUCKETS: [Bucket; 3] = [Bucket::Strong, Bucket::Medium, Bucket::Weak];

impl Bucket {
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Strong => "Strong",
            Bucket::Medium => "Medium",
            Bucket::Weak => "Weak",
        }
    }

    pub fn from_name(name: &str) -> Option<Bucket> {
        ALL_BUCKETS.iter().copied().find(|b| b.name() == name)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub fn score(hand: HandClass, board: BoardTexture, seat: Seat) -> i32 {
    let bonus = board.effect(hand) + seat.bonus();
    (hand.base_score() + bonus).clamp(0, 100)
}

pub fn classify_score(score: i32) -> Bucket {
    if score >= STRONG_THRESHOLD {
        Bucket::Strong
    } else if score >= MEDIUM_THRESHOLD {
        Bucket::Medium
    } else {
        Bucket::Weak
    }
}

pub fn classify(hand: HandClass, board: BoardTexture, seat: Seat) -> Bucket {
    classify_score(score(hand, board, seat))
}

static FALLBACK_BOARD: Lazy<Vec<Card>> = Lazy::new(|| {
    ["As", "Kd", "7c"]
        .iter()
        .filter_map(|code| match parse_card_face(code) {
            CardFace::Up(card) => Some(card),
            CardFace::Back => None,
        })
        .collect()
});

/// A representative flop for the texture, or A-K-7 when none is known.
pub fn sample_board(board: Option<BoardTexture>) -> Vec<Card> {
    board
        .and_then(|b| parse_board(&b.sample_codes()).ok())
        .unwrap_or_else(|| FALLBACK_BOARD.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nut_fd_is_not_a_draw_for_board_effects() {
        assert_eq!(BoardTexture::Wet.effect(HandClass::NutFlushDrawOvercards), 0);
        assert_eq!(BoardTexture::Paired.effect(HandClass::NutFlushDrawOvercards), 0);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(classify_score(70), Bucket::Strong);
        assert_eq!(classify_score(69), Bucket::Medium);
        assert_eq!(classify_score(45), Bucket::Medium);
        assert_eq!(classify_score(44), Bucket::Weak);
    }

    #[test]
    fn test_score_clamped_to_100() {
        assert_eq!(score(HandClass::SetTrips, BoardTexture::Paired, Seat::InPosition), 100);
    }

    #[test]
    fn test_fallback_board() {
        let board = sample_board(None);
        assert_eq!(board.iter().map(|c| c.to_string()).collect::<Vec<_>>(), ["As", "Kd", "7c"]);
    }
}
