/// Characters counted as one "word" for WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute from finalized correct characters.
///
/// Before the first second has elapsed the divisor is one minute, so the
/// display reads near zero instead of dividing by zero.
pub fn wpm(correct_chars: usize, elapsed_seconds: u32) -> u32 {
    let minutes = if elapsed_seconds == 0 {
        1.0
    } else {
        elapsed_seconds as f64 / 60.0
    };
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Keystroke accuracy as a whole percentage; 100 before any keystroke.
pub fn accuracy(correct_typed_chars: usize, total_typed_chars: usize) -> u32 {
    if total_typed_chars == 0 {
        return 100;
    }
    (correct_typed_chars as f64 / total_typed_chars as f64 * 100.0).round() as u32
}
