use crate::session::typing::TypingSession;

/// Logical key identity of one keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Letter(char),
    Separator,
    Backspace,
    Other,
}

impl KeyInput {
    pub fn from_char(ch: char) -> Self {
        if ch == ' ' {
            KeyInput::Separator
        } else if ch.is_ascii_alphabetic() {
            KeyInput::Letter(ch)
        } else {
            KeyInput::Other
        }
    }
}

pub fn process_letter(session: &mut TypingSession, ch: char) {
    if !ch.is_ascii_alphabetic() {
        return;
    }
    let Some(word) = session.pool.get_mut(session.current_word_index) else {
        return;
    };

    word.push(ch);
    let pos = word.typed_len() - 1;
    session.current_char_index = Some(pos);
    session.total_typed_chars += 1;
    if word.expected_at(pos) == Some(ch) {
        session.correct_typed_chars += 1;
    }
}

/// Finalize the current word and move to the next one. Returns false when
/// the word has nothing typed yet.
pub fn process_separator(session: &mut TypingSession) -> bool {
    let Some(word) = session.pool.get_mut(session.current_word_index) else {
        return false;
    };
    if word.typed_len() == 0 {
        return false;
    }

    session.total_typed_chars += 1;
    session.correct_typed_chars += 1;
    session.correct_chars += word.finalize();

    session.current_word_index += 1;
    session.current_char_index = None;
    session.pool.update_window(session.current_word_index);
    true
}

/// Erase one character, stepping back into the previous word when the
/// current one is empty. Keystroke counters are left untouched.
pub fn process_backspace(session: &mut TypingSession) {
    if session.current_char_index.is_some() {
        if let Some(word) = session.pool.get_mut(session.current_word_index) {
            word.pop();
            session.current_char_index = word.typed_len().checked_sub(1);
        }
        return;
    }

    if session.current_word_index == 0 {
        return;
    }

    session.current_word_index -= 1;
    if let Some(word) = session.pool.get_mut(session.current_word_index) {
        word.reopen();
        word.pop();
        session.current_char_index = word.typed_len().checked_sub(1);
    }
    session.pool.update_window(session.current_word_index);
}
