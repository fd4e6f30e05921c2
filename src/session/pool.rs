use std::ops::Range;

use rand::rngs::SmallRng;

use crate::generator::corpus::SharedCorpus;
use crate::session::SessionError;
use crate::session::word::Word;

/// Remaining words beyond the window end below which the looping supply
/// appends another copy of its corpus.
pub const LOW_WATER_MARK: usize = 50;
/// Already-passed words kept in the visible window for backspace.
pub const LOOKBACK: usize = 10;
/// Stand-in drawn while a random corpus is still loading.
pub const PLACEHOLDER: &str = "wait";

pub enum WordSupply {
    /// A fixed token list appended again and again.
    Looping(Vec<String>),
    /// Uniform draws from a shared, possibly still loading, word list.
    Random { corpus: SharedCorpus, rng: SmallRng },
    /// A fixed token list appended once; the session ends when it runs out.
    Finite(Vec<String>),
}

impl WordSupply {
    pub fn is_finite(&self) -> bool {
        matches!(self, WordSupply::Finite(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WordSupply::Looping(_) => "looping",
            WordSupply::Random { .. } => "random",
            WordSupply::Finite(_) => "finite",
        }
    }
}

/// Append-only word stream with a sliding visible window.
pub struct WordPool {
    words: Vec<Word>,
    supply: WordSupply,
    start: usize,
    end: usize,
    visible_word_count: usize,
    total_chars: usize,
}

impl WordPool {
    pub fn new(supply: WordSupply, visible_word_count: usize) -> Result<Self, SessionError> {
        if visible_word_count <= LOOKBACK {
            return Err(SessionError::WindowTooSmall {
                visible: visible_word_count,
                lookback: LOOKBACK,
            });
        }
        match &supply {
            WordSupply::Looping(tokens) | WordSupply::Finite(tokens) if tokens.is_empty() => {
                return Err(SessionError::EmptyCorpus);
            }
            _ => {}
        }
        Ok(Self {
            words: Vec::new(),
            supply,
            start: 0,
            end: 0,
            visible_word_count,
            total_chars: 0,
        })
    }

    /// Discard all words and fill the pool for a fresh session.
    pub fn seed(&mut self) -> Result<(), SessionError> {
        if let WordSupply::Random { corpus, .. } = &self.supply {
            if corpus.is_empty_ready() {
                return Err(SessionError::EmptyCorpus);
            }
        }

        self.words.clear();
        self.total_chars = 0;
        self.start = 0;

        let finite_tokens = match &self.supply {
            WordSupply::Finite(tokens) => Some(tokens.clone()),
            _ => None,
        };
        match finite_tokens {
            Some(tokens) => self.append_all(&tokens),
            None => while self.ensure_capacity(0) > 0 {},
        }

        self.end = self.visible_word_count.min(self.words.len());
        tracing::debug!(
            supply = self.supply.as_str(),
            words = self.words.len(),
            total_chars = self.total_chars,
            "word pool seeded"
        );
        Ok(())
    }

    /// Extend the stream when fewer than [`LOW_WATER_MARK`] words remain
    /// beyond `ahead_of`. Returns the number of words appended.
    ///
    /// The looping supply appends one full copy of its corpus per call; the
    /// random supply draws single words until the mark is met; the finite
    /// supply never grows.
    pub fn ensure_capacity(&mut self, ahead_of: usize) -> usize {
        let remaining = self.words.len().saturating_sub(ahead_of);
        if remaining >= LOW_WATER_MARK {
            return 0;
        }

        let appended = match &mut self.supply {
            WordSupply::Looping(tokens) => {
                let tokens = tokens.clone();
                self.append_all(&tokens);
                tokens.len()
            }
            WordSupply::Random { corpus, rng } => {
                let needed = LOW_WATER_MARK - remaining;
                let drawn: Vec<String> = (0..needed)
                    .map(|_| corpus.draw(rng).unwrap_or_else(|| PLACEHOLDER.to_string()))
                    .collect();
                self.append_all(&drawn);
                needed
            }
            WordSupply::Finite(_) => 0,
        };

        if appended > 0 {
            tracing::debug!(
                appended,
                pool_len = self.words.len(),
                total_chars = self.total_chars,
                "word pool extended"
            );
        }
        appended
    }

    /// Each appended word adds its length, plus one separator when it
    /// follows an existing word.
    fn append_all(&mut self, tokens: &[String]) {
        for token in tokens {
            let word = Word::new(token);
            if !self.words.is_empty() {
                self.total_chars += 1;
            }
            self.total_chars += word.len();
            self.words.push(word);
        }
    }

    /// Recompute the visible window around `current`.
    pub fn update_window(&mut self, current: usize) {
        match self.supply {
            WordSupply::Looping(_) => {
                let end = (current + self.visible_word_count).min(self.words.len());
                self.ensure_capacity(end);
                if current > LOOKBACK {
                    self.start = current - LOOKBACK;
                    self.end = (current + self.visible_word_count).min(self.words.len());
                } else {
                    self.start = 0;
                    self.end = self.visible_word_count.min(self.words.len());
                }
            }
            WordSupply::Random { .. } => {
                self.ensure_capacity(current);
                self.start = 0;
                self.end = self.words.len();
            }
            WordSupply::Finite(_) => {
                self.start = 0;
                self.end = self.words.len();
            }
        }
    }

    /// Redraw untouched placeholder words from `from` onward once the random
    /// corpus has loaded. Returns how many words were replaced.
    pub fn refresh_placeholders(&mut self, from: usize) -> usize {
        let WordSupply::Random { corpus, rng } = &mut self.supply else {
            return 0;
        };
        if !corpus.is_ready() {
            return 0;
        }

        let mut replaced = 0;
        for word in self.words.iter_mut().skip(from) {
            if !word.is_untouched() || word.text_string() != PLACEHOLDER {
                continue;
            }
            let Some(fresh) = corpus.draw(rng) else {
                break;
            };
            self.total_chars = self.total_chars - word.len() + fresh.chars().count();
            word.replace_text(&fresh);
            replaced += 1;
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.supply.is_finite()
    }

    pub fn supply(&self) -> &WordSupply {
        &self.supply
    }

    pub fn get(&self, idx: usize) -> Option<&Word> {
        self.words.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Word> {
        self.words.get_mut(idx)
    }

    pub fn window(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn visible(&self) -> &[Word] {
        &self.words[self.start..self.end]
    }

    /// Translate an index into [`WordPool::visible`] to a pool index.
    pub fn to_absolute(&self, visible_idx: usize) -> usize {
        self.start + visible_idx
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn visible_word_count(&self) -> usize {
        self.visible_word_count
    }
}
