use std::fmt;

use crate::error::{DrillError, DrillResult};

/// Code used for a face-down card in board illustrations.
pub const BACK_CODE: &str = "BACK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> DrillResult<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(DrillError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_char(c: char) -> DrillResult<Suit> {
        match c.to_ascii_lowercase() {
            's' => Ok(Suit::Spades),
            'h' => Ok(Suit::Hearts),
            'd' => Ok(Suit::Diamonds),
            'c' => Ok(Suit::Clubs),
            _ => Err(DrillError::InvalidSuit(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.rank.to_char(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// A card as drawn on the table: face up, or face down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    Up(Card),
    Back,
}

pub fn parse_card(code: &str) -> DrillResult<Card> {
    let code = code.trim();
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 2 {
        return Err(DrillError::InvalidCardCode(code.to_string()));
    }
    let rank = Rank::from_char(chars[0])?;
    let suit = Suit::from_char(chars[1])?;
    Ok(Card::new(rank, suit))
}

/// Parses a display code, never failing: `BACK` is face down, a bad rank
/// becomes an ace and a bad or missing suit becomes spades.
pub fn parse_card_face(code: &str) -> CardFace {
    if code == BACK_CODE {
        return CardFace::Back;
    }
    let mut chars = code.chars();
    let rank = chars
        .next()
        .and_then(|c| Rank::from_char(c).ok())
        .unwrap_or(Rank::Ace);
    let suit = chars
        .next()
        .and_then(|c| Suit::from_char(c).ok())
        .unwrap_or(Suit::Spades);
    CardFace::Up(Card::new(rank, suit))
}

pub fn parse_board(codes: &[&str]) -> DrillResult<Vec<Card>> {
    codes.iter().map(|c| parse_card(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_face_back() {
        assert_eq!(parse_card_face("BACK"), CardFace::Back);
    }

    #[test]
    fn test_parse_card_face_lenient() {
        assert_eq!(
            parse_card_face("td"),
            CardFace::Up(Card::new(Rank::Ten, Suit::Diamonds))
        );
        assert_eq!(
            parse_card_face(""),
            CardFace::Up(Card::new(Rank::Ace, Suit::Spades))
        );
        assert_eq!(
            parse_card_face("Kx"),
            CardFace::Up(Card::new(Rank::King, Suit::Spades))
        );
    }

    #[test]
    fn test_parse_board_rejects_bad_code() {
        assert!(parse_board(&["As", "7d", "2"]).is_err());
        assert_eq!(parse_board(&["As", "7d", "2c"]).unwrap().len(), 3);
    }
}
