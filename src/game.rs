use crate::word_bank::WordBank;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Seconds on the clock when a timed game starts.
pub const DEFAULT_TIME_SECS: u32 = 30;
/// Seconds added to the clock for every accepted word in timed mode.
pub const SUCCESS_BONUS_SECS: u32 = 2;
/// Score awarded per word in the chain, seed word included.
pub const POINTS_PER_WORD: usize = 10;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Countries,
    Sports,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Countries, Category::Sports];

    /// Lowercase name used for word list files.
    pub fn slug(&self) -> String {
        self.to_string().to_lowercase()
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Untimed,
    Timed,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Untimed, Difficulty::Timed];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub start_secs: u32,
    pub bonus_secs: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            start_secs: DEFAULT_TIME_SECS,
            bonus_secs: SUCCESS_BONUS_SECS,
        }
    }
}

/// Identity of one play-through. Changes on every start and reset, so work
/// scheduled for an older session can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Idle,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Empty input, or no game running.
    Ignored,
    Accepted,
    Rejected { required: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick for a session that is gone, paused or untimed.
    Stale,
    Counting(u32),
    Expired,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("select a category before starting")]
    MissingCategory,
    #[error("select a difficulty before starting")]
    MissingDifficulty,
    #[error("no words available for {0}")]
    EmptyCategory(Category),
}

/// Owns one word chain game: selection, chain validation, streaks and the
/// countdown bookkeeping. The countdown itself is driven from outside through
/// [`GameController::tick`].
#[derive(Debug)]
pub struct GameController {
    bank: WordBank,
    settings: TimerSettings,
    rng: StdRng,
    category: Option<Category>,
    difficulty: Option<Difficulty>,
    word_chain: Vec<String>,
    current_word: String,
    pending_input: String,
    time_remaining: u32,
    running: bool,
    warning: Option<String>,
    current_streak: u32,
    best_streak: u32,
    session: SessionId,
}

impl GameController {
    pub fn new(bank: WordBank, settings: TimerSettings) -> Self {
        Self::with_rng(bank, settings, StdRng::from_entropy())
    }

    pub fn with_seed(bank: WordBank, settings: TimerSettings, seed: u64) -> Self {
        Self::with_rng(bank, settings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(bank: WordBank, settings: TimerSettings, rng: StdRng) -> Self {
        Self {
            bank,
            settings,
            rng,
            category: None,
            difficulty: None,
            word_chain: Vec::new(),
            current_word: String::new(),
            pending_input: String::new(),
            time_remaining: settings.start_secs,
            running: false,
            warning: None,
            current_streak: 0,
            best_streak: 0,
            session: SessionId(0),
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn word_chain(&self) -> &[String] {
        &self.word_chain
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn is_timed(&self) -> bool {
        self.difficulty == Some(Difficulty::Timed)
    }

    pub fn phase(&self) -> Phase {
        match (self.category, self.difficulty, self.running) {
            (_, _, true) => Phase::Running,
            (Some(_), Some(_), false) => Phase::Idle,
            _ => Phase::Unconfigured,
        }
    }

    pub fn score(&self) -> usize {
        self.word_chain.len() * POINTS_PER_WORD
    }

    /// Letter the next word has to start with, lowercased.
    pub fn required_letter(&self) -> Option<char> {
        self.current_word
            .chars()
            .last()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
    }

    /// The session a countdown should be running for, if any.
    pub fn countdown_session(&self) -> Option<SessionId> {
        (self.is_timed() && self.running).then_some(self.session)
    }

    /// A timed game that ran the clock down to zero.
    pub fn is_expired(&self) -> bool {
        self.is_timed()
            && !self.running
            && self.time_remaining == 0
            && !self.word_chain.is_empty()
    }

    pub fn select_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.reset_game();
    }

    pub fn select_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.difficulty = difficulty;
        self.reset_game();
    }

    /// Seed a fresh chain with a random word and start accepting input.
    pub fn start_game(&mut self) -> Result<SessionId, GameError> {
        let category = self.category.ok_or(GameError::MissingCategory)?;
        let difficulty = self.difficulty.ok_or(GameError::MissingDifficulty)?;
        let first = self
            .bank
            .pick(category, &mut self.rng)
            .ok_or(GameError::EmptyCategory(category))?
            .to_string();

        self.session = self.next_session();
        self.word_chain = vec![first.clone()];
        self.current_word = first;
        self.pending_input.clear();
        self.time_remaining = self.settings.start_secs;
        self.running = true;
        self.warning = None;
        self.current_streak = 0;

        info!(
            %category,
            %difficulty,
            seed_word = %self.current_word,
            session = self.session.0,
            "game started"
        );
        Ok(self.session)
    }

    /// Back to the not-running state without re-seeding. The best streak is
    /// kept for the lifetime of the controller.
    pub fn reset_game(&mut self) {
        self.session = self.next_session();
        self.word_chain.clear();
        self.current_word.clear();
        self.pending_input.clear();
        self.time_remaining = self.settings.start_secs;
        self.running = false;
        self.warning = None;
        self.current_streak = 0;

        debug!(
            category = ?self.category,
            difficulty = ?self.difficulty,
            session = self.session.0,
            "game reset"
        );
    }

    pub fn push_input(&mut self, c: char) {
        self.pending_input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.pending_input.pop();
    }

    pub fn submit_pending(&mut self) -> Submission {
        let input = std::mem::take(&mut self.pending_input);
        let outcome = self.submit_word(&input);
        if outcome == Submission::Ignored {
            self.pending_input = input;
        }
        outcome
    }

    pub fn submit_word(&mut self, input: &str) -> Submission {
        if input.is_empty() || !self.running {
            return Submission::Ignored;
        }

        let Some(required) = self.required_letter() else {
            return Submission::Ignored;
        };

        let matches = input
            .chars()
            .next()
            .is_some_and(|first| first.to_lowercase().eq(required.to_lowercase()));

        if matches {
            self.word_chain.push(input.to_string());
            self.current_word = input.to_string();
            self.pending_input.clear();
            self.warning = None;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
            if self.is_timed() {
                self.time_remaining = self.time_remaining.saturating_add(self.settings.bonus_secs);
            }
            Submission::Accepted
        } else {
            self.warning = Some(format!(
                "Word must start with \"{}\"",
                required.to_uppercase()
            ));
            self.pending_input.clear();
            self.current_streak = 0;
            Submission::Rejected { required }
        }
    }

    /// One countdown step for `session`. Reaching zero is a hard stop: only a
    /// new `start_game` brings the clock back.
    pub fn tick(&mut self, session: SessionId) -> TickOutcome {
        if session != self.session || !self.running || !self.is_timed() {
            return TickOutcome::Stale;
        }

        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            self.running = false;
            info!(
                words = self.word_chain.len(),
                score = self.score(),
                session = self.session.0,
                "time expired"
            );
            TickOutcome::Expired
        } else {
            self.time_remaining -= 1;
            TickOutcome::Counting(self.time_remaining)
        }
    }

    fn next_session(&self) -> SessionId {
        SessionId(self.session.0.wrapping_add(1))
    }
}
