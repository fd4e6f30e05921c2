use crate::session::SessionError;
use crate::session::highlight::{self, Glyph, WordRelation};
use crate::session::input::{self, KeyInput};
use crate::session::pool::WordPool;
use crate::session::result::ResultSummary;
use crate::session::score;
use crate::session::word::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Completed,
}

/// What `start` does once a session has completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Completion is permanent; later `start` calls are ignored.
    OneShot,
    /// A completed session may be started again.
    Repeatable,
}

/// The keystroke state machine.
///
/// Words are finalized only by an explicit separator keystroke; typing a
/// word's full length never advances on its own.
pub struct TypingSession {
    pub pool: WordPool,
    pub state: SessionState,
    pub policy: CompletionPolicy,
    pub current_word_index: usize,
    /// `None` while nothing is typed in the current word.
    pub current_char_index: Option<usize>,
    pub elapsed_seconds: u32,
    pub duration_limit: u32,
    pub total_typed_chars: usize,
    pub correct_typed_chars: usize,
    pub correct_chars: usize,
    pub wpm: u32,
    pub accuracy: u32,
    participant_label: Option<String>,
}

impl TypingSession {
    pub fn new(pool: WordPool, duration_limit: u32, policy: CompletionPolicy) -> Self {
        Self {
            pool,
            state: SessionState::Idle,
            policy,
            current_word_index: 0,
            current_char_index: None,
            elapsed_seconds: 0,
            duration_limit,
            total_typed_chars: 0,
            correct_typed_chars: 0,
            correct_chars: 0,
            wpm: 0,
            accuracy: 100,
            participant_label: None,
        }
    }

    pub fn with_participant_label(mut self, label: Option<String>) -> Self {
        self.participant_label = label;
        self
    }

    pub fn set_participant_label(&mut self, label: Option<String>) {
        self.participant_label = label;
    }

    pub fn participant_label(&self) -> Option<&str> {
        self.participant_label.as_deref()
    }

    pub fn can_start(&self) -> bool {
        !(self.state == SessionState::Completed && self.policy == CompletionPolicy::OneShot)
    }

    /// Seed the pool, reset every counter and become active.
    ///
    /// Returns `Ok(false)` without touching anything when a one-shot session
    /// has already completed.
    pub fn start(&mut self) -> Result<bool, SessionError> {
        if !self.can_start() {
            tracing::debug!("start ignored, session already completed");
            return Ok(false);
        }

        self.pool.seed()?;
        self.current_word_index = 0;
        self.current_char_index = None;
        self.elapsed_seconds = 0;
        self.total_typed_chars = 0;
        self.correct_typed_chars = 0;
        self.correct_chars = 0;
        self.wpm = 0;
        self.accuracy = 100;
        self.state = SessionState::Active;

        tracing::info!(
            supply = self.pool.supply().as_str(),
            duration = self.duration_limit,
            words = self.pool.len(),
            "session started"
        );
        Ok(true)
    }

    /// Apply one keystroke. Returns the final summary when this keystroke
    /// completed the session (a finite pool ran out).
    pub fn handle_key(&mut self, key: KeyInput) -> Option<ResultSummary> {
        if !self.is_active() {
            return None;
        }

        match key {
            KeyInput::Backspace => input::process_backspace(self),
            KeyInput::Letter(ch) => input::process_letter(self, ch),
            KeyInput::Separator => {
                if input::process_separator(self)
                    && self.pool.is_finite()
                    && self.current_word_index >= self.pool.len()
                {
                    return self.finish();
                }
            }
            KeyInput::Other => {}
        }
        None
    }

    /// One elapsed second. Returns the final summary when time ran out.
    pub fn on_tick(&mut self) -> Option<ResultSummary> {
        if !self.is_active() {
            return None;
        }

        self.elapsed_seconds += 1;
        self.recompute_scores();

        if self.elapsed_seconds >= self.duration_limit {
            return self.finish();
        }
        None
    }

    /// Complete the session. Only the first call on an active session yields
    /// a summary; later calls return `None` and leave the scores unchanged.
    pub fn finish(&mut self) -> Option<ResultSummary> {
        if !self.is_active() {
            return None;
        }

        self.state = SessionState::Completed;
        self.recompute_scores();
        tracing::info!(
            wpm = self.wpm,
            accuracy = self.accuracy,
            elapsed = self.elapsed_seconds,
            words = self.current_word_index,
            "session completed"
        );
        Some(ResultSummary::from_session(self))
    }

    pub fn recompute_scores(&mut self) {
        self.wpm = score::wpm(self.correct_chars, self.elapsed_seconds);
        self.accuracy = score::accuracy(self.correct_typed_chars, self.total_typed_chars);
    }

    /// Swap in real words for loading placeholders that are not reached yet.
    pub fn refresh_placeholders(&mut self) -> usize {
        let from = match self.current_word() {
            Some(word) if word.typed_len() == 0 => self.current_word_index,
            _ => self.current_word_index + 1,
        };
        self.pool.refresh_placeholders(from)
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn total_chars(&self) -> usize {
        self.pool.total_chars()
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.duration_limit.saturating_sub(self.elapsed_seconds)
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.pool.get(self.current_word_index)
    }

    pub fn visible_words(&self) -> &[Word] {
        self.pool.visible()
    }

    pub fn relation_of(&self, absolute_idx: usize) -> WordRelation {
        use std::cmp::Ordering;
        match absolute_idx.cmp(&self.current_word_index) {
            Ordering::Less => WordRelation::Past,
            Ordering::Equal => WordRelation::Current,
            Ordering::Greater => WordRelation::Upcoming,
        }
    }

    /// Highlight glyphs for the word at `visible_idx` in the visible window.
    pub fn highlight(&self, visible_idx: usize) -> Vec<Glyph> {
        let absolute = self.pool.to_absolute(visible_idx);
        match self.pool.get(absolute) {
            Some(word) => highlight::project(word, self.relation_of(absolute)),
            None => Vec::new(),
        }
    }
}
