use crate::session::word::Word;

/// Where a word sits relative to the word being typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordRelation {
    Past,
    Current,
    Upcoming,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Correct,
    Incorrect,
    /// The next source character to be typed.
    Cursor,
    /// Source character with no annotation.
    Plain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Char {
        ch: char,
        class: CharClass,
        /// Set on the last surplus character of the current word.
        cursor: bool,
    },
    /// Zero-width cursor after a fully typed current word.
    EndCursor,
}

impl Glyph {
    fn plain(ch: char) -> Self {
        Glyph::Char {
            ch,
            class: CharClass::Plain,
            cursor: false,
        }
    }

    fn classed(ch: char, class: CharClass) -> Self {
        Glyph::Char {
            ch,
            class,
            cursor: false,
        }
    }

    pub fn has_cursor(&self) -> bool {
        match self {
            Glyph::Char { class, cursor, .. } => *cursor || *class == CharClass::Cursor,
            Glyph::EndCursor => true,
        }
    }
}

/// Character-level annotation of `word` for display.
///
/// Typed positions show the source character classed by match. Surplus typed
/// characters are shown as typed and always incorrect.
pub fn project(word: &Word, relation: WordRelation) -> Vec<Glyph> {
    let text = word.text();
    if relation == WordRelation::Upcoming {
        return text.iter().map(|&ch| Glyph::plain(ch)).collect();
    }

    let typed = word.typed();
    let is_current = relation == WordRelation::Current;
    let mut glyphs = Vec::with_capacity(text.len().max(typed.len()) + 1);

    for (i, &expected) in text.iter().enumerate() {
        let glyph = match typed.get(i) {
            Some(&actual) if actual == expected => Glyph::classed(expected, CharClass::Correct),
            Some(_) => Glyph::classed(expected, CharClass::Incorrect),
            None if i == typed.len() && is_current => Glyph::classed(expected, CharClass::Cursor),
            None => Glyph::plain(expected),
        };
        glyphs.push(glyph);
    }

    if typed.len() > text.len() {
        let last = typed.len() - 1;
        for (i, &extra) in typed.iter().enumerate().skip(text.len()) {
            glyphs.push(Glyph::Char {
                ch: extra,
                class: CharClass::Incorrect,
                cursor: is_current && i == last,
            });
        }
    }

    if typed.len() == text.len() && is_current {
        glyphs.push(Glyph::EndCursor);
    }

    glyphs
}
