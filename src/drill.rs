use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::display::{render_screen, toast};
use crate::error::DrillResult;
use crate::question::Mode;
use crate::session::Session;
use crate::storage::KvStore;
use crate::timer::Clock;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillCommand {
    Answer(usize),
    Next,
    ToggleTimer,
    ResetTimer,
    SetMode(Mode),
    SetMinutes(u32),
    Review(bool),
    ResetStats,
    ClearMistakes,
    NewAfterTimeout,
    Show,
    Help,
    Quit,
    Unknown,
}

pub fn parse_command(line: &str) -> DrillCommand {
    let lower = line.trim().to_lowercase();
    let mut words = lower.split_whitespace();
    let Some(head) = words.next() else {
        return DrillCommand::Show;
    };
    let arg = words.next();

    match (head, arg) {
        ("1" | "2" | "3" | "4", None) => head
            .parse::<usize>()
            .map(|n| DrillCommand::Answer(n - 1))
            .unwrap_or(DrillCommand::Unknown),
        ("n" | "next", None) => DrillCommand::Next,
        ("s" | "space" | "start" | "pause", None) => DrillCommand::ToggleTimer,
        ("r" | "reset", None) => DrillCommand::ResetTimer,
        ("m" | "mode", Some(m)) => m
            .parse::<Mode>()
            .map(DrillCommand::SetMode)
            .unwrap_or(DrillCommand::Unknown),
        ("t" | "time", Some(t)) => t
            .parse::<u32>()
            .map(DrillCommand::SetMinutes)
            .unwrap_or(DrillCommand::Unknown),
        ("review", Some("on")) => DrillCommand::Review(true),
        ("review", Some("off")) => DrillCommand::Review(false),
        ("stats", Some("reset")) => DrillCommand::ResetStats,
        ("mistakes", Some("clear")) => DrillCommand::ClearMistakes,
        ("new", None) => DrillCommand::NewAfterTimeout,
        ("h" | "help" | "?", None) => DrillCommand::Help,
        ("q" | "quit" | "exit", None) => DrillCommand::Quit,
        _ => DrillCommand::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

fn read_command(reader: &mut dyn BufRead, writer: &mut dyn Write) -> Option<String> {
    write!(writer, "{} ", ">".cyan().bold()).ok();
    writer.flush().ok();
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

pub fn drill_command<S: KvStore, C: Clock>(session: &mut Session<S, C>) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_drill(session, &mut reader, &mut writer);
}

pub fn run_drill<S: KvStore, C: Clock>(
    session: &mut Session<S, C>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) {
    let strings = session.lang().strings();
    writeln!(writer).ok();
    writeln!(writer, "{}", strings.title.cyan().bold()).ok();
    writeln!(writer, "{}\n", strings.help.dimmed()).ok();
    writeln!(writer, "{}", render_screen(session)).ok();

    while let Some(line) = read_command(reader, writer) {
        session.tick();
        let command = parse_command(&line);
        tracing::debug!(?command, "drill command");
        if command == DrillCommand::Quit {
            break;
        }
        if let Err(e) = apply_command(session, command, writer) {
            writeln!(writer, "  {}", format!("Error: {}", e).red()).ok();
        }
    }
    writeln!(writer, "{}", strings.bye).ok();
}

/// Commands the time-up overlay still answers to.
fn allowed_after_time_up(command: DrillCommand) -> bool {
    matches!(
        command,
        DrillCommand::ResetTimer
            | DrillCommand::NewAfterTimeout
            | DrillCommand::ToggleTimer
            | DrillCommand::Help
            | DrillCommand::Show
            | DrillCommand::Quit
    )
}

fn apply_command<S: KvStore, C: Clock>(
    session: &mut Session<S, C>,
    command: DrillCommand,
    writer: &mut dyn Write,
) -> DrillResult<()> {
    let strings = session.lang().strings();
    if session.is_over() && !allowed_after_time_up(command) {
        tracing::debug!(?command, "ignored after time up");
        writeln!(writer, "{}", render_screen(session)).ok();
        return Ok(());
    }
    match command {
        DrillCommand::Answer(idx) => {
            if let Some(outcome) = session.choose(idx)? {
                writeln!(writer, "{}", toast(&outcome, session.lang())).ok();
            }
        }
        DrillCommand::Next => {
            session.next_question();
        }
        DrillCommand::ToggleTimer => session.toggle_timer(),
        DrillCommand::ResetTimer => session.reset_timer(),
        DrillCommand::SetMode(mode) => session.set_mode(mode)?,
        DrillCommand::SetMinutes(minutes) => session.set_minutes(minutes)?,
        DrillCommand::Review(on) => session.set_review_only(on)?,
        DrillCommand::ResetStats => session.reset_stats()?,
        DrillCommand::ClearMistakes => session.clear_mistakes()?,
        DrillCommand::NewAfterTimeout => {
            if session.is_over() {
                session.new_question_after_timeout();
            } else {
                session.next_question();
            }
        }
        DrillCommand::Help => {
            writeln!(writer, "{}", strings.help).ok();
            return Ok(());
        }
        DrillCommand::Unknown => {
            writeln!(writer, "{}", strings.unknown_command.yellow()).ok();
            return Ok(());
        }
        DrillCommand::Show | DrillCommand::Quit => {}
    }
    writeln!(writer, "{}", render_screen(session)).ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answers_are_zero_based() {
        assert_eq!(parse_command("1"), DrillCommand::Answer(0));
        assert_eq!(parse_command(" 4 \n"), DrillCommand::Answer(3));
        assert_eq!(parse_command("5"), DrillCommand::Unknown);
    }

    #[test]
    fn test_parse_mode_and_minutes() {
        assert_eq!(parse_command("m fe"), DrillCommand::SetMode(Mode::FoldEquity));
        assert_eq!(parse_command("mode RANGE3"), DrillCommand::SetMode(Mode::Range3));
        assert_eq!(parse_command("t 45"), DrillCommand::SetMinutes(45));
        assert_eq!(parse_command("t soon"), DrillCommand::Unknown);
        assert_eq!(parse_command("m"), DrillCommand::Unknown);
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command(""), DrillCommand::Show);
        assert_eq!(parse_command("S"), DrillCommand::ToggleTimer);
        assert_eq!(parse_command("review on"), DrillCommand::Review(true));
        assert_eq!(parse_command("stats reset"), DrillCommand::ResetStats);
        assert_eq!(parse_command("mistakes clear"), DrillCommand::ClearMistakes);
        assert_eq!(parse_command("q"), DrillCommand::Quit);
    }
}
