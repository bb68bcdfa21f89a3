use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;

use crate::cards::{parse_card_face, CardFace, BACK_CODE};
use crate::labels::{
    board_label, hand_label, kind_prompt, mode_label, option_label, seat_label, Lang,
};
use crate::math_engine::to_pct_label;
use crate::question::{Question, QuestionKind};
use crate::range3::sample_board;
use crate::session::{AnswerOutcome, Session};
use crate::stats::Stats;
use crate::storage::KvStore;
use crate::timer::{format_time, Clock};

pub const TIME_BAR_WIDTH: usize = 30;

pub fn time_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    if ratio >= 0.5 {
        bar.green().to_string()
    } else if ratio >= 0.2 {
        bar.yellow().to_string()
    } else {
        bar.red().to_string()
    }
}

pub fn card_face_display(face: CardFace) -> String {
    match face {
        CardFace::Back => "[##]".dimmed().to_string(),
        CardFace::Up(card) => {
            let label = format!("[{}]", card.pretty());
            if card.suit.is_red() {
                label.red().bold().to_string()
            } else {
                label.white().bold().to_string()
            }
        }
    }
}

/// Sample flop for the spot plus two face-down hole cards.
pub fn board_mini(question: &Question) -> String {
    let board = sample_board(question.meta.as_ref().map(|m| m.board))
        .into_iter()
        .map(|c| card_face_display(CardFace::Up(c)))
        .join(" ");
    let hole = [BACK_CODE, BACK_CODE]
        .iter()
        .map(|code| card_face_display(parse_card_face(code)))
        .join(" ");
    format!("  {}\n  {}", board, hole)
}

pub fn header_line<S: KvStore, C: Clock>(session: &Session<S, C>) -> String {
    let timer = session.timer();
    let strings = session.lang().strings();
    let state = if timer.is_running() {
        strings.running.green().to_string()
    } else {
        strings.paused.dimmed().to_string()
    };
    let review = if session.review_only() {
        format!("  [{}]", strings.review_on).magenta().to_string()
    } else {
        String::new()
    };
    format!(
        "{}  \u{23f1} {} {} ({}){}",
        mode_label(session.lang(), session.mode()).cyan().bold(),
        format_time(timer.remaining_ms()).bold(),
        time_bar(timer.time_ratio(), TIME_BAR_WIDTH),
        state,
        review
    )
}

pub fn stats_table(stats: &Stats, mistakes: usize, score: u64, streak: u64, best: u64, lang: Lang) -> String {
    let s = lang.strings();
    let avg = if stats.avg_ms() > 0.0 {
        format!("{:.1}{}", stats.avg_ms() / 1000.0, s.seconds)
    } else {
        "-".to_string()
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new(s.answered),
        Cell::new(s.correct),
        Cell::new(s.accuracy),
        Cell::new(s.average),
        Cell::new(s.mistakes),
        Cell::new(s.score),
        Cell::new(s.combo),
        Cell::new(s.best),
    ]);
    table.add_row(vec![
        Cell::new(stats.answered).set_alignment(CellAlignment::Right),
        Cell::new(stats.correct).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.1}%", stats.accuracy() * 100.0)).set_alignment(CellAlignment::Right),
        Cell::new(avg).set_alignment(CellAlignment::Right),
        Cell::new(mistakes).set_alignment(CellAlignment::Right),
        Cell::new(score.to_string().yellow().bold().to_string()).set_alignment(CellAlignment::Right),
        Cell::new(format!("x{}", streak)).set_alignment(CellAlignment::Right),
        Cell::new(format!("x{}", best)).set_alignment(CellAlignment::Right),
    ]);
    table.to_string()
}

pub fn session_stats_table<S: KvStore, C: Clock>(session: &Session<S, C>) -> String {
    stats_table(
        session.stats(),
        session.mistakes().len(),
        session.score(),
        session.streak(),
        session.best_streak(),
        session.lang(),
    )
}

fn option_line(question: &Question, idx: usize, selected: Option<usize>, lang: Lang) -> String {
    let text = format!("{}. {}", idx + 1, option_label(lang, &question.options[idx]));
    match selected {
        None => text,
        Some(_) if question.is_correct(idx) => format!("{} \u{2714}", text).green().bold().to_string(),
        Some(sel) if sel == idx => format!("{} \u{2718}", text).red().bold().to_string(),
        Some(_) => text.dimmed().to_string(),
    }
}

pub fn question_panel(question: &Question, selected: Option<usize>, lang: Lang) -> String {
    let s = lang.strings();
    let mut lines = vec![kind_prompt(lang, question.qtype).dimmed().to_string()];

    match (question.qtype, question.meta.as_ref()) {
        (QuestionKind::Range3, meta) => {
            let hand = meta.map(|m| hand_label(lang, m.hand)).unwrap_or_default();
            let board = meta.map(|m| board_label(lang, m.board)).unwrap_or_default();
            let seat = meta.map(|m| seat_label(lang, m.position)).unwrap_or_default();
            lines.push(format!(
                "{}: {} / {}: {} / {}: {}",
                s.hand,
                hand.bold(),
                s.board,
                board.bold(),
                s.position,
                seat.cyan()
            ));
            lines.push(board_mini(question));
        }
        _ => {
            lines.push(format!(
                "{} = {}, {} = {}",
                s.pot,
                question.pot.to_string().bold(),
                s.bet,
                question.bet.to_string().bold()
            ));
        }
    }

    for idx in 0..question.options.len() {
        lines.push(format!("  {}", option_line(question, idx, selected, lang)));
    }

    if let Some(sel) = selected {
        let verdict = if question.is_correct(sel) { s.right.green() } else { s.wrong.red() };
        lines.push(format!("{} {}", verdict, question.explanation));
    }
    lines.join("\n")
}

pub fn toast(outcome: &AnswerOutcome, lang: Lang) -> String {
    if outcome.is_correct {
        format!("\u{2705} +{}", outcome.points).green().bold().to_string()
    } else {
        lang.strings().combo_over.red().bold().to_string()
    }
}

pub fn time_up_panel(stats: &Stats, lang: Lang) -> String {
    let s = lang.strings();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new(s.time_up.red().bold().to_string())]);
    table.add_row(vec![Cell::new(format!(
        "{} {} {}, {} {:.1}{}",
        s.session_done,
        s.accuracy,
        to_pct_label(stats.accuracy()),
        s.average,
        stats.avg_ms() / 1000.0,
        s.seconds
    ))]);
    table.add_row(vec![Cell::new(s.time_up_hint.dimmed().to_string())]);
    table.to_string()
}

pub fn render_screen<S: KvStore, C: Clock>(session: &Session<S, C>) -> String {
    let lang = session.lang();
    let mut out = vec![
        header_line(session),
        session_stats_table(session),
    ];
    if session.review_only() && session.mistakes().is_empty() {
        out.push(lang.strings().review_empty.dimmed().to_string());
    }
    out.push(question_panel(session.question(), session.selected(), lang));
    if session.is_over() {
        out.push(time_up_panel(session.stats(), lang));
    }
    out.join("\n")
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green().bold());
}
