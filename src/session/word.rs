#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordStatus {
    Pending,
    Correct,
    Incorrect,
}

/// One entry of the word stream: the source text plus whatever the
/// participant has typed against it.
#[derive(Clone, Debug)]
pub struct Word {
    text: Vec<char>,
    typed: Vec<char>,
    status: WordStatus,
    /// Matching characters already folded into the session's `correct_chars`.
    credited: usize,
}

impl Word {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            typed: Vec::new(),
            status: WordStatus::Pending,
            credited: 0,
        }
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn text_string(&self) -> String {
        self.text.iter().collect()
    }

    pub fn typed_string(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn status(&self) -> WordStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn typed_len(&self) -> usize {
        self.typed.len()
    }

    pub fn is_untouched(&self) -> bool {
        self.typed.is_empty() && self.status == WordStatus::Pending
    }

    /// Source character at `idx`, `None` past the end of the word.
    pub fn expected_at(&self, idx: usize) -> Option<char> {
        self.text.get(idx).copied()
    }

    pub fn push(&mut self, ch: char) {
        self.typed.push(ch);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.typed.pop()
    }

    /// Positions in `[0, text.len())` where the typed character matches.
    pub fn matching_chars(&self) -> usize {
        self.text
            .iter()
            .zip(self.typed.iter())
            .filter(|(expected, actual)| expected == actual)
            .count()
    }

    /// Fix the word's status and return how many matching characters are
    /// newly credited. A word finalized again after a backspace only credits
    /// matches beyond what it already contributed.
    pub fn finalize(&mut self) -> usize {
        self.status = if self.typed == self.text {
            WordStatus::Correct
        } else {
            WordStatus::Incorrect
        };
        let matches = self.matching_chars();
        let newly = matches.saturating_sub(self.credited);
        self.credited = self.credited.max(matches);
        newly
    }

    pub fn reopen(&mut self) {
        self.status = WordStatus::Pending;
    }

    pub(crate) fn replace_text(&mut self, text: &str) {
        self.text = text.chars().collect();
    }
}
