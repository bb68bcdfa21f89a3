use std::io::Cursor;

use fst_drill::drill::run_drill;
use fst_drill::labels::Lang;
use fst_drill::question::{Mode, QuestionKind};
use fst_drill::session::{Session, SessionOptions};
use fst_drill::storage::{load_prefs, load_score, MemoryStore};
use fst_drill::timer::{minutes_to_ms, ManualClock};

fn drive(store: &MemoryStore, clock: &ManualClock, lang: Lang, input: impl FnOnce(&Session<&MemoryStore, &ManualClock>) -> String) -> String {
    let mut session = Session::new(store, clock, SessionOptions { seed: Some(7), lang });
    let script = input(&session);
    let mut reader = Cursor::new(script.into_bytes());
    let mut out: Vec<u8> = Vec::new();
    run_drill(&mut session, &mut reader, &mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn test_quit_prints_banner_and_bye() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let out = drive(&store, &clock, Lang::En, |_| "q\n".to_string());
    assert!(out.contains("FST Drill"));
    assert!(out.contains("Bye."));
}

#[test]
fn test_eof_ends_the_loop() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let out = drive(&store, &clock, Lang::En, |_| String::new());
    assert!(out.contains("Bye."));
}

#[test]
fn test_correct_answer_shows_points() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let out = drive(&store, &clock, Lang::En, |s| {
        format!("{}\nq\n", s.question().correct_index + 1)
    });
    assert!(out.contains("+150"));
    assert_eq!(load_score(&store), 150);
}

#[test]
fn test_wrong_answer_ends_combo() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let out = drive(&store, &clock, Lang::En, |s| {
        let wrong = (s.question().correct_index + 1) % s.question().options.len();
        format!("{}\nq\n", wrong + 1)
    });
    assert!(out.contains("Combo over"));
    assert_eq!(load_score(&store), 0);
}

#[test]
fn test_unknown_command_and_help() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let out = drive(&store, &clock, Lang::En, |_| "jump\nh\nq\n".to_string());
    assert!(out.contains("Unknown command"));
    assert!(out.matches("Commands:").count() >= 2);
}

#[test]
fn test_mode_and_minutes_commands_persist() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    drive(&store, &clock, Lang::En, |_| "m range3\nt 45\nreview on\nq\n".to_string());
    let prefs = load_prefs(&store).unwrap();
    assert_eq!(prefs.mode, Mode::Range3);
    assert_eq!(prefs.minutes, 45);
    assert!(prefs.review_only);

    let session = Session::new(&store, &clock, SessionOptions { seed: Some(1), lang: Lang::En });
    assert_eq!(session.question().qtype, QuestionKind::Range3);
}

#[test]
fn test_japanese_strings() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let out = drive(&store, &clock, Lang::Ja, |s| {
        let wrong = (s.question().correct_index + 1) % s.question().options.len();
        format!("{}\nq\n", wrong + 1)
    });
    assert!(out.contains("FST ドリル"));
    assert!(out.contains("コンボ終了"));
}

fn timed_out<'a>(store: &'a MemoryStore, clock: &'a ManualClock) -> Session<&'a MemoryStore, &'a ManualClock> {
    let mut session = Session::new(store, clock, SessionOptions { seed: Some(7), lang: Lang::En });
    session.set_minutes(5).unwrap();
    session.toggle_timer();
    clock.advance(minutes_to_ms(5));
    session.tick();
    assert!(session.is_over());
    session
}

#[test]
fn test_time_up_ignores_setting_changes() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = timed_out(&store, &clock);
    let id = session.question().id.clone();

    let mut out: Vec<u8> = Vec::new();
    let mut input = Cursor::new(b"m range3\nt 45\nreview on\nq\n".to_vec());
    run_drill(&mut session, &mut input, &mut out);

    assert!(session.is_over());
    assert_eq!(session.mode(), Mode::Mixed);
    assert_eq!(session.question().id, id);
    assert_eq!(session.timer().minutes(), 5);
    assert!(!session.review_only());
    let prefs = load_prefs(&store).unwrap();
    assert_eq!(prefs.mode, Mode::Mixed);
    assert_eq!(prefs.minutes, 5);
    assert!(String::from_utf8(out).unwrap().contains("Time's up"));
}

#[test]
fn test_reset_leaves_time_up() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(0);
    let mut session = timed_out(&store, &clock);

    let mut out: Vec<u8> = Vec::new();
    let mut input = Cursor::new(b"new\nr\nm fe\nq\n".to_vec());
    run_drill(&mut session, &mut input, &mut out);

    assert!(!session.is_over());
    assert_eq!(session.mode(), Mode::FoldEquity);
    assert_eq!(session.question().qtype, QuestionKind::FoldEquity);
}
