use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};

use wordrush::session::input::KeyInput;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Translate a terminal key press into session input.
pub fn key_input(key: &KeyEvent) -> KeyInput {
    match key.code {
        KeyCode::Char(ch) => KeyInput::from_char(ch),
        KeyCode::Backspace => KeyInput::Backspace,
        _ => KeyInput::Other,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_is_separator() {
        assert_eq!(key_input(&press(KeyCode::Char(' '))), KeyInput::Separator);
    }

    #[test]
    fn letters_and_backspace_map_through() {
        assert_eq!(key_input(&press(KeyCode::Char('q'))), KeyInput::Letter('q'));
        assert_eq!(key_input(&press(KeyCode::Backspace)), KeyInput::Backspace);
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(key_input(&press(KeyCode::Char('7'))), KeyInput::Other);
        assert_eq!(key_input(&press(KeyCode::Tab)), KeyInput::Other);
        assert_eq!(key_input(&press(KeyCode::Left)), KeyInput::Other);
    }
}
