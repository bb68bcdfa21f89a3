//! Drill session state: current question, timer, score and the saved
//! mistakes list. Every mutation writes the affected blobs back to the store.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::DrillResult;
use crate::labels::Lang;
use crate::question::{new_question_for, Mode, Question};
use crate::stats::{points_for, Stats};
use crate::storage::{
    load_best_streak, load_mistakes, load_prefs, load_score, load_stats, save_best_streak,
    save_mistakes, save_prefs, save_score, save_stats, KvStore, Prefs,
};
use crate::timer::{clamp_minutes, Clock, SessionTimer};

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub seed: Option<u64>,
    pub lang: Lang,
}

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub chosen: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub elapsed_ms: u64,
    pub points: u64,
    pub streak: u64,
}

pub struct Session<S: KvStore, C: Clock> {
    store: S,
    clock: C,
    rng: StdRng,
    lang: Lang,
    mode: Mode,
    timer: SessionTimer,
    question: Question,
    selected: Option<usize>,
    stats: Stats,
    review_only: bool,
    mistakes: Vec<Question>,
    streak: u64,
    best_streak: u64,
    score: u64,
    last_outcome: Option<AnswerOutcome>,
}

impl<S: KvStore, C: Clock> Session<S, C> {
    /// Restores persisted state from `store` and deals the first question.
    pub fn new(store: S, clock: C, options: SessionOptions) -> Self {
        let prefs = load_prefs(&store).unwrap_or_default();
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let question = new_question_for(prefs.mode, &mut rng, options.lang, clock.now_ms());
        let stats = load_stats(&store).unwrap_or_default();
        let mistakes = load_mistakes(&store);
        let score = load_score(&store);
        let best_streak = load_best_streak(&store);
        tracing::debug!(
            mode = %prefs.mode,
            minutes = prefs.minutes,
            mistakes = mistakes.len(),
            score,
            "session restored"
        );
        let session = Session {
            store,
            clock,
            rng,
            lang: options.lang,
            mode: prefs.mode,
            timer: SessionTimer::new(clamp_minutes(prefs.minutes)),
            question,
            selected: None,
            stats,
            review_only: prefs.review_only,
            mistakes,
            streak: 0,
            best_streak,
            score,
            last_outcome: None,
        };
        if let Err(e) = session.persist_prefs() {
            tracing::warn!(error = %e, "could not save preferences");
        }
        session
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn review_only(&self) -> bool {
        self.review_only
    }

    pub fn mistakes(&self) -> &[Question] {
        &self.mistakes
    }

    pub fn streak(&self) -> u64 {
        self.streak
    }

    pub fn best_streak(&self) -> u64 {
        self.best_streak
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.timer.is_over()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advances the countdown to the clock's current reading.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.timer.tick(now);
    }

    fn prefs(&self) -> Prefs {
        Prefs {
            mode: self.mode,
            minutes: self.timer.minutes(),
            review_only: self.review_only,
        }
    }

    fn persist_prefs(&self) -> DrillResult<()> {
        save_prefs(&self.store, &self.prefs())
    }

    fn fresh_question(&mut self) -> Question {
        let now = self.clock.now_ms();
        new_question_for(self.mode, &mut self.rng, self.lang, now)
    }

    /// Moves on to another question. Returns `false` once time is up.
    pub fn next_question(&mut self) -> bool {
        self.tick();
        if self.timer.is_over() {
            return false;
        }
        self.selected = None;
        self.last_outcome = None;
        let review = if self.review_only {
            self.mistakes.choose(&mut self.rng).cloned()
        } else {
            None
        };
        self.question = match review {
            Some(mut q) => {
                q.asked_at = self.clock.now_ms();
                tracing::debug!(id = %q.id, "re-asking saved mistake");
                q
            }
            None => self.fresh_question(),
        };
        true
    }

    /// Deals a new question after the timer ran out.
    pub fn new_question_after_timeout(&mut self) {
        self.selected = None;
        self.last_outcome = None;
        self.question = self.fresh_question();
    }

    /// Answers the current question with option `index`. Returns `None` when
    /// the answer is not accepted: time is up, the question was already
    /// answered, or the index is out of range.
    ///
    /// The answer is fully applied in memory before anything is written, so
    /// a failed write leaves the session consistent. Every blob is attempted
    /// and the first write error is returned.
    pub fn choose(&mut self, index: usize) -> DrillResult<Option<AnswerOutcome>> {
        self.tick();
        if self.timer.is_over() || self.selected.is_some() || index >= self.question.options.len() {
            return Ok(None);
        }
        self.selected = Some(index);
        let elapsed_ms = self.clock.now_ms().saturating_sub(self.question.asked_at);
        let is_correct = self.question.is_correct(index);
        self.stats.record(is_correct, elapsed_ms);

        let mut points = 0;
        let mistakes_before = self.mistakes.len();
        let best_before = self.best_streak;
        if is_correct {
            let id = &self.question.id;
            self.mistakes.retain(|q| &q.id != id);
            points = points_for(elapsed_ms, self.streak);
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.score += points;
        } else {
            if !self.mistakes.iter().any(|q| q.id == self.question.id) {
                self.mistakes.push(self.question.clone());
            }
            self.streak = 0;
        }

        let outcome = AnswerOutcome {
            chosen: index,
            correct_index: self.question.correct_index,
            is_correct,
            elapsed_ms,
            points,
            streak: self.streak,
        };
        self.last_outcome = Some(outcome);
        tracing::debug!(
            id = %self.question.id,
            is_correct,
            elapsed_ms,
            points,
            streak = self.streak,
            "answer recorded"
        );

        let mut writes = vec![save_stats(&self.store, &self.stats)];
        if self.mistakes.len() != mistakes_before {
            writes.push(save_mistakes(&self.store, &self.mistakes));
        }
        if self.best_streak != best_before {
            writes.push(save_best_streak(&self.store, self.best_streak));
        }
        if is_correct {
            writes.push(save_score(&self.store, self.score));
        }
        writes.into_iter().collect::<DrillResult<Vec<()>>>()?;
        Ok(Some(outcome))
    }

    pub fn set_mode(&mut self, mode: Mode) -> DrillResult<()> {
        self.mode = mode;
        self.selected = None;
        self.last_outcome = None;
        self.question = self.fresh_question();
        self.persist_prefs()
    }

    /// Sets the session length (clamped to the allowed range) and resets the
    /// countdown.
    pub fn set_minutes(&mut self, minutes: u32) -> DrillResult<()> {
        self.timer.set_minutes(minutes);
        self.persist_prefs()
    }

    pub fn set_review_only(&mut self, review_only: bool) -> DrillResult<()> {
        self.review_only = review_only;
        self.persist_prefs()
    }

    /// Starts or pauses the countdown. Starting records the current clock
    /// reading so the next tick counts from now.
    pub fn toggle_timer(&mut self) {
        self.tick();
        self.timer.toggle();
        self.tick();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset(None);
    }

    pub fn reset_stats(&mut self) -> DrillResult<()> {
        self.stats = Stats::default();
        save_stats(&self.store, &self.stats)
    }

    pub fn clear_mistakes(&mut self) -> DrillResult<()> {
        self.mistakes.clear();
        save_mistakes(&self.store, &self.mistakes)
    }

    pub fn accuracy(&self) -> f64 {
        self.stats.accuracy()
    }

    pub fn avg_ms(&self) -> f64 {
        self.stats.avg_ms()
    }
}
