use std::collections::HashSet;

use fst_drill::labels::Lang;
use fst_drill::math_engine::to_pct_label;
use fst_drill::question::*;
use fst_drill::range3::{classify, Bucket};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

// ---------------------------------------------------------------------------
// Pot and bet
// ---------------------------------------------------------------------------

#[test]
fn test_pot_and_bet_ranges() {
    let mut r = rng(3);
    for _ in 0..2_000 {
        let (pot, bet) = generate_pot_and_bet(&mut r);
        assert!((10..=100).contains(&pot), "pot {} out of range", pot);
        assert!(bet >= 1);
        let matches_factor = BET_FACTORS
            .iter()
            .any(|f| ((pot as f64 * f).round() as u32).max(1) == bet);
        assert!(matches_factor, "bet {} is no listed fraction of pot {}", bet, pot);
    }
}

// ---------------------------------------------------------------------------
// Formula questions
// ---------------------------------------------------------------------------

fn assert_formula_question(q: &Question, prefix: &str, expected: f64) {
    assert_eq!(q.options.len(), OPTION_COUNT);
    let labels: HashSet<&String> = q.options.iter().collect();
    assert_eq!(labels.len(), OPTION_COUNT, "duplicate labels in {:?}", q.options);
    assert_eq!(q.options[q.correct_index], to_pct_label(expected));
    let expected_id = format!("{}|{}|{}|{}", prefix, q.pot, q.bet, q.options.join("|"));
    assert_eq!(q.id, expected_id);
    assert!(q.meta.is_none());
}

#[test]
fn test_pot_odds_questions() {
    let mut r = rng(11);
    for _ in 0..500 {
        let q = gen_pot_odds_question(&mut r, Lang::En, 0);
        assert_eq!(q.qtype, QuestionKind::PotOdds);
        let (p, b) = (q.pot as f64, q.bet as f64);
        assert_formula_question(&q, "POT", b / (p + 2.0 * b));
    }
}

#[test]
fn test_fold_equity_questions() {
    let mut r = rng(12);
    for _ in 0..500 {
        let q = gen_fold_equity_question(&mut r, Lang::En, 0);
        assert_eq!(q.qtype, QuestionKind::FoldEquity);
        let (p, b) = (q.pot as f64, q.bet as f64);
        assert_formula_question(&q, "FE", b / (p + b));
    }
}

#[test]
fn test_classic_mistakes_are_offered_when_distinct() {
    // pot 100, bet 50: 25.0% correct, 33.3% / 50.0% / 50.0% mistakes.
    let mut r = rng(5);
    let opts = distinct_options(&mut r, &[0.25, 1.0 / 3.0, 0.5, 0.5]);
    let labels: Vec<&str> = opts.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(&labels[..3], &["25.0%", "33.3%", "50.0%"]);
    let tweak = opts[3].value;
    assert!((tweak - 0.25).abs() <= TWEAK_SPREAD + 1e-9);
    assert!(!opts[3].is_correct);
}

#[test]
fn test_explanations() {
    let mut r = rng(1);
    let q = gen_pot_odds_question(&mut r, Lang::En, 0);
    assert!(q.explanation.contains("b / (p + 2b)"));
    assert!(q.explanation.contains(&format!("p={}, b={}", q.pot, q.bet)));
    assert!(q.explanation.contains(&q.options[q.correct_index]));

    let q = gen_fold_equity_question(&mut r, Lang::Ja, 0);
    assert!(q.explanation.contains("b / (p + b)"));
    assert!(q.explanation.contains("正解は"));
}

#[test]
fn test_asked_at_is_stamped() {
    let mut r = rng(2);
    let q = new_question_for(Mode::PotOdds, &mut r, Lang::En, 12_345);
    assert_eq!(q.asked_at, 12_345);
}

// ---------------------------------------------------------------------------
// Range-3 questions
// ---------------------------------------------------------------------------

#[test]
fn test_range3_questions() {
    let mut r = rng(21);
    for _ in 0..300 {
        let q = gen_range3_question(&mut r, Lang::En, 0);
        assert_eq!(q.qtype, QuestionKind::Range3);
        assert_eq!((q.pot, q.bet), (0, 0));
        let mut sorted = q.options.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["Medium", "Strong", "Weak"]);

        let meta = q.meta.expect("range-3 questions carry their spot");
        let bucket = classify(meta.hand, meta.board, meta.position);
        assert_eq!(Bucket::from_name(&q.options[q.correct_index]), Some(bucket));
        assert_eq!(
            q.id,
            format!("R3|{}|{}|{}", meta.hand.name(), meta.board.name(), meta.position.code())
        );
        assert!(q.explanation.contains(&format!("Score {}", meta.score)));
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[test]
fn test_fixed_modes_pick_their_kind() {
    let mut r = rng(8);
    for _ in 0..50 {
        assert_eq!(new_question_for(Mode::PotOdds, &mut r, Lang::En, 0).qtype, QuestionKind::PotOdds);
        assert_eq!(new_question_for(Mode::FoldEquity, &mut r, Lang::En, 0).qtype, QuestionKind::FoldEquity);
        assert_eq!(new_question_for(Mode::Range3, &mut r, Lang::En, 0).qtype, QuestionKind::Range3);
    }
}

#[test]
fn test_mixed_mode_covers_every_kind() {
    let mut r = rng(9);
    let kinds: HashSet<QuestionKind> = (0..300)
        .map(|_| new_question_for(Mode::Mixed, &mut r, Lang::En, 0).qtype)
        .collect();
    assert_eq!(kinds.len(), ALL_KINDS.len());
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let a = new_question_for(Mode::Mixed, &mut rng(99), Lang::En, 0);
    let b = new_question_for(Mode::Mixed, &mut rng(99), Lang::En, 0);
    assert_eq!(a, b);
}

#[test]
fn test_question_json_field_names() {
    let q = gen_range3_question(&mut rng(4), Lang::En, 10);
    let json = serde_json::to_value(&q).unwrap();
    assert_eq!(json["qtype"], "RANGE3");
    assert!(json.get("correctIndex").is_some());
    assert!(json.get("askedAt").is_some());
    let meta = &json["meta"];
    assert!(meta["position"] == "IP" || meta["position"] == "OOP");

    let pot = gen_pot_odds_question(&mut rng(4), Lang::En, 10);
    let json = serde_json::to_value(&pot).unwrap();
    assert_eq!(json["qtype"], "POT_ODDS");
    assert!(json.get("meta").is_none());
}
