use std::collections::HashSet;

use fst_drill::cards::*;
use fst_drill::error::DrillError;

#[test]
fn test_card_display_and_pretty() {
    let c = Card::new(Rank::King, Suit::Diamonds);
    assert_eq!(format!("{}", c), "Kd");
    assert_eq!(c.pretty(), "K\u{2666}");
    assert_eq!(Card::new(Rank::Ace, Suit::Spades).pretty(), "A\u{2660}");
}

#[test]
fn test_rank_order() {
    assert!(Rank::Two < Rank::Ace);
    assert!(Rank::Ten > Rank::Nine);
    assert_eq!(Rank::Queen as u8, 12);
}

#[test]
fn test_invalid_rank_and_suit() {
    assert!(matches!(Rank::from_char('X'), Err(DrillError::InvalidRank('X'))));
    assert!(matches!(Suit::from_char('x'), Err(DrillError::InvalidSuit('x'))));
}

#[test]
fn test_parse_card_is_case_insensitive() {
    assert_eq!(parse_card("tH").unwrap(), Card::new(Rank::Ten, Suit::Hearts));
    assert_eq!(parse_card(" 7c ").unwrap(), Card::new(Rank::Seven, Suit::Clubs));
}

#[test]
fn test_parse_card_rejects_wrong_length() {
    assert!(matches!(parse_card("A"), Err(DrillError::InvalidCardCode(_))));
    assert!(matches!(parse_card("10h"), Err(DrillError::InvalidCardCode(_))));
}

#[test]
fn test_red_suits() {
    assert!(Suit::Hearts.is_red());
    assert!(Suit::Diamonds.is_red());
    assert!(!Suit::Spades.is_red());
    assert!(!Suit::Clubs.is_red());
}

#[test]
fn test_card_faces() {
    assert_eq!(parse_card_face(BACK_CODE), CardFace::Back);
    assert_eq!(parse_card_face("9s"), CardFace::Up(Card::new(Rank::Nine, Suit::Spades)));
    assert_eq!(parse_card_face("?h"), CardFace::Up(Card::new(Rank::Ace, Suit::Hearts)));
}

#[test]
fn test_board_cards_are_distinct() {
    let board = parse_board(&["Th", "9h", "8c"]).unwrap();
    let unique: HashSet<Card> = board.iter().copied().collect();
    assert_eq!(unique.len(), 3);
}
