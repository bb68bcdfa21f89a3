use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use tracing_subscriber::EnvFilter;

use crate::display::{print_error, print_section, print_success, stats_table};
use crate::drill::drill_command;
use crate::error::DrillResult;
use crate::labels::{board_label, hand_label, mode_label, option_label, seat_label, Lang};
use crate::math_engine::{bluff_ev, call_ev, fold_equity_breakeven, pot_odds};
use crate::question::{Mode, QuestionKind};
use crate::session::{Session, SessionOptions};
use crate::stats::Stats;
use crate::storage::{
    load_best_streak, load_mistakes, load_score, load_stats, save_mistakes, save_stats, FileStore,
};
use crate::timer::SystemClock;

const DATA_DIR_NAME: &str = ".fst-drill";

#[derive(Parser)]
#[command(name = "fst", version = "1.0.0", about = "Poker math drill: pot odds, fold equity and hand-strength buckets against the clock.")]
struct Cli {
    /// Directory holding saved progress
    #[arg(long, env = "FST_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,
    /// Display language
    #[arg(long, value_enum, default_value = "en", global = true)]
    lang: LangArg,
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LangArg {
    En,
    Ja,
}

impl LangArg {
    fn lang(self) -> Lang {
        match self {
            LangArg::En => Lang::En,
            LangArg::Ja => Lang::Ja,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Mixed,
    Pot,
    Fe,
    Range3,
}

impl ModeArg {
    fn mode(self) -> Mode {
        match self {
            ModeArg::Mixed => Mode::Mixed,
            ModeArg::Pot => Mode::PotOdds,
            ModeArg::Fe => Mode::FoldEquity,
            ModeArg::Range3 => Mode::Range3,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive timed drill (default)
    Drill {
        /// Question mix
        #[arg(short, long)]
        mode: Option<ModeArg>,
        /// Session length in minutes (5-180)
        #[arg(short = 't', long)]
        minutes: Option<u32>,
        /// Only re-ask saved mistakes
        #[arg(long)]
        review_only: bool,
        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show saved totals
    Stats {
        /// Zero the answered/correct/time totals
        #[arg(long)]
        reset: bool,
    },
    /// List saved mistakes
    Mistakes {
        /// Forget all saved mistakes
        #[arg(long)]
        clear: bool,
    },
    /// Equity needed to call a bet
    Odds {
        /// Current pot size
        pot: f64,
        /// Bet size to call
        bet: f64,
        /// Your equity (0-1) to calculate EV
        #[arg(short, long = "equity")]
        equity_val: Option<f64>,
    },
    /// Fold rate a bluff needs to break even
    Fe {
        /// Current pot size
        pot: f64,
        /// Bluff size
        bet: f64,
        /// Expected fold rate (0-1) to calculate EV
        #[arg(short, long)]
        fold: Option<f64>,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn dispatch(cli: Cli) {
    init_logging(cli.verbose);
    let lang = cli.lang.lang();
    let store = FileStore::new(cli.data_dir.unwrap_or_else(default_data_dir));
    tracing::debug!(dir = %store.dir().display(), "using data directory");

    let result = match cli.command.unwrap_or(Commands::Drill {
        mode: None,
        minutes: None,
        review_only: false,
        seed: None,
    }) {
        Commands::Drill {
            mode,
            minutes,
            review_only,
            seed,
        } => cmd_drill(store, lang, mode, minutes, review_only, seed),
        Commands::Stats { reset } => cmd_stats(&store, lang, reset),
        Commands::Mistakes { clear } => cmd_mistakes(&store, lang, clear),
        Commands::Odds {
            pot,
            bet,
            equity_val,
        } => cmd_odds(pot, bet, equity_val),
        Commands::Fe { pot, bet, fold } => cmd_fe(pot, bet, fold),
    };
    if let Err(e) = result {
        print_error(&e.to_string());
    }
}

fn cmd_drill(
    store: FileStore,
    lang: Lang,
    mode: Option<ModeArg>,
    minutes: Option<u32>,
    review_only: bool,
    seed: Option<u64>,
) -> DrillResult<()> {
    let mut session = Session::new(store, SystemClock::new(), SessionOptions { seed, lang });
    if let Some(m) = mode {
        session.set_mode(m.mode())?;
    }
    if let Some(min) = minutes {
        session.set_minutes(min)?;
    }
    if review_only {
        session.set_review_only(true)?;
    }
    drill_command(&mut session);
    Ok(())
}

fn cmd_stats(store: &FileStore, lang: Lang, reset: bool) -> DrillResult<()> {
    if reset {
        save_stats(store, &Stats::default())?;
        print_success(lang.strings().stats_reset);
        return Ok(());
    }
    let stats = load_stats(store).unwrap_or_default();
    let mistakes = load_mistakes(store);
    println!();
    println!(
        "{}",
        stats_table(&stats, mistakes.len(), load_score(store), 0, load_best_streak(store), lang)
    );
    println!();
    Ok(())
}

fn cmd_mistakes(store: &FileStore, lang: Lang, clear: bool) -> DrillResult<()> {
    if clear {
        save_mistakes(store, &[])?;
        print_success(lang.strings().mistakes_cleared);
        return Ok(());
    }
    let s = lang.strings();
    let mistakes = load_mistakes(store);
    if mistakes.is_empty() {
        print_section(s.mistakes, s.review_empty);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new(s.kind),
        Cell::new(s.spot),
        Cell::new(s.answer),
    ]);
    for (i, q) in mistakes.iter().enumerate() {
        let (kind, spot) = match (q.qtype, q.meta.as_ref()) {
            (QuestionKind::Range3, Some(meta)) => (
                mode_label(lang, Mode::Range3),
                format!(
                    "{} / {} / {}",
                    hand_label(lang, meta.hand),
                    board_label(lang, meta.board),
                    seat_label(lang, meta.position)
                ),
            ),
            (QuestionKind::Range3, None) => (mode_label(lang, Mode::Range3), "-".to_string()),
            (QuestionKind::PotOdds, _) => {
                (mode_label(lang, Mode::PotOdds), format!("p={} b={}", q.pot, q.bet))
            }
            (QuestionKind::FoldEquity, _) => {
                (mode_label(lang, Mode::FoldEquity), format!("p={} b={}", q.pot, q.bet))
            }
        };
        let answer = q
            .correct_option()
            .map(|o| option_label(lang, o))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(kind),
            Cell::new(spot),
            Cell::new(answer.green().to_string()),
        ]);
    }
    println!("\n{}\n", table);
    Ok(())
}

fn cmd_odds(pot: f64, bet: f64, equity_val: Option<f64>) -> DrillResult<()> {
    let needed = pot_odds(pot, bet)?;

    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric".bold().to_string()),
        Cell::new("Value"),
    ]);
    table.add_row(vec![Cell::new("Pot"), Cell::new(format!("{:.0}", pot))]);
    table.add_row(vec![Cell::new("Bet"), Cell::new(format!("{:.0}", bet))]);
    table.add_row(vec![
        Cell::new("Total Pot"),
        Cell::new(format!("{:.0}", pot + bet + bet)),
    ]);
    table.add_row(vec![
        Cell::new("Equity Needed"),
        Cell::new(format!("{:.1}%", needed * 100.0)),
    ]);

    if let Some(eq) = equity_val {
        let ev_val = call_ev(eq, pot, bet);
        let ev_str = if ev_val >= 0.0 {
            format!("{:.2}", ev_val).green().to_string()
        } else {
            format!("{:.2}", ev_val).red().to_string()
        };
        table.add_row(vec![
            Cell::new("Your Equity"),
            Cell::new(format!("{:.1}%", eq * 100.0)),
        ]);
        table.add_row(vec![Cell::new("EV of Call"), Cell::new(ev_str)]);
        let verdict = if ev_val >= 0.0 {
            "CALL".green().bold().to_string()
        } else {
            "FOLD".red().bold().to_string()
        };
        table.add_row(vec![Cell::new("Verdict"), Cell::new(verdict)]);
    }

    println!("{}", table);
    println!();
    Ok(())
}

fn cmd_fe(pot: f64, bet: f64, fold: Option<f64>) -> DrillResult<()> {
    let be_pct = fold_equity_breakeven(pot, bet)?;

    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new(""), Cell::new("")]);
    table.add_row(vec![
        Cell::new("Pot".bold().to_string()),
        Cell::new(format!("{:.0}", pot)),
    ]);
    table.add_row(vec![
        Cell::new("Bluff".bold().to_string()),
        Cell::new(format!("{:.0}", bet)),
    ]);
    table.add_row(vec![
        Cell::new("Break-Even Folds".bold().to_string()),
        Cell::new(format!("{:.1}%", be_pct * 100.0)),
    ]);
    if let Some(f) = fold {
        let ev_val = bluff_ev(f, pot, bet);
        let ev_str = if ev_val >= 0.0 {
            format!("{:.2}", ev_val).green().to_string()
        } else {
            format!("{:.2}", ev_val).red().to_string()
        };
        table.add_row(vec![Cell::new("EV of Bluff".bold().to_string()), Cell::new(ev_str)]);
    }
    println!("{}", table);

    println!(
        "\n  Villain needs to fold {} for a 0 EV bluff.",
        format!("{:.1}%", be_pct * 100.0).bold()
    );
    println!();
    Ok(())
}
