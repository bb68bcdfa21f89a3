use std::path::PathBuf;

use fst_drill::labels::Lang;
use fst_drill::question::{gen_pot_odds_question, gen_range3_question, Mode};
use fst_drill::stats::Stats;
use fst_drill::storage::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fst-drill-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_file_store_round_trip() {
    let dir = temp_dir("roundtrip");
    let store = FileStore::new(&dir);
    assert!(store.get(SCORE_KEY).is_none());
    store.set(SCORE_KEY, "420").unwrap();
    assert!(dir.join("fst.score.v1.json").exists());
    assert_eq!(store.get(SCORE_KEY).as_deref(), Some("420"));
    assert_eq!(load_score(&store), 420);
    store.remove(SCORE_KEY).unwrap();
    store.remove(SCORE_KEY).unwrap();
    assert!(store.get(SCORE_KEY).is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_prefs_round_trip() {
    let store = MemoryStore::new();
    assert!(load_prefs(&store).is_none());
    let prefs = Prefs { mode: Mode::Range3, minutes: 45, review_only: true };
    save_prefs(&store, &prefs).unwrap();
    assert_eq!(load_prefs(&store), Some(prefs));
    let raw = store.get(PREF_KEY).unwrap();
    assert!(raw.contains("\"RANGE3\""));
    assert!(raw.contains("reviewOnly"));
}

#[test]
fn test_prefs_require_numeric_minutes() {
    let store = MemoryStore::new();
    store.set(PREF_KEY, r#"{"mode":"MIXED","minutes":"30"}"#).unwrap();
    assert!(load_prefs(&store).is_none());
    store.set(PREF_KEY, "not json").unwrap();
    assert!(load_prefs(&store).is_none());
}

#[test]
fn test_stats_guard() {
    let store = MemoryStore::new();
    store.set(STATS_KEY, r#"{"answered":3,"correct":2}"#).unwrap();
    assert!(load_stats(&store).is_none());
    store
        .set(STATS_KEY, r#"{"answered":3,"correct":2,"totalMs":4500.5}"#)
        .unwrap();
    let stats = load_stats(&store).unwrap();
    assert_eq!(stats, Stats { answered: 3, correct: 2, total_ms: 4500.5 });
}

#[test]
fn test_mistakes_skip_bad_entries() {
    let store = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(6);
    let q1 = gen_pot_odds_question(&mut rng, Lang::En, 0);
    let q2 = gen_range3_question(&mut rng, Lang::En, 0);
    let raw = format!(
        "[{}, null, 7, {{\"id\":\"half\"}}, {}]",
        serde_json::to_string(&q1).unwrap(),
        serde_json::to_string(&q2).unwrap()
    );
    store.set(MISTAKES_KEY, &raw).unwrap();
    let loaded = load_mistakes(&store);
    assert_eq!(loaded, vec![q1, q2]);
}

#[test]
fn test_mistakes_round_trip() {
    let store = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(8);
    let qs = vec![gen_range3_question(&mut rng, Lang::Ja, 5)];
    save_mistakes(&store, &qs).unwrap();
    assert_eq!(load_mistakes(&store), qs);
    save_mistakes(&store, &[]).unwrap();
    assert!(load_mistakes(&store).is_empty());
}

#[test]
fn test_counters() {
    let store = MemoryStore::new();
    save_best_streak(&store, 12).unwrap();
    assert_eq!(load_best_streak(&store), 12);
    store.set(BESTSTREAK_KEY, "-3").unwrap();
    assert_eq!(load_best_streak(&store), 0);
}
