//! Keyboard sampling on the game thread.
//!
//! Input model: every key event refreshes a `key_frame` map with the frame
//! number it was last seen on.  On terminals that report key releases a key
//! is held until its release event.  Classic terminals only send repeated
//! `Press` events while a key is down, so there a key stays held for
//! `HOLD_WINDOW_MS` after its last press, which outlasts the OS delay before
//! auto-repeat kicks in.  A `Press` only counts as "pressed this tick" when
//! the key was not already held, so auto-repeat never looks like a new press.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{FrameInput, InputSource, Key};

/// How long a key stays held after its last press when the terminal does
/// not report releases.  OS auto-repeat starts 250–500 ms after the press.
const HOLD_WINDOW_MS: u64 = 600;

pub struct TerminalInput {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// `None` when the terminal reports releases.
    hold_frames: Option<u64>,
}

impl TerminalInput {
    pub fn new(reports_releases: bool, fps: u32) -> Self {
        let hold_frames = (!reports_releases)
            .then(|| (HOLD_WINDOW_MS * u64::from(fps.max(1)) / 1000).max(1));
        TerminalInput {
            key_frame: HashMap::new(),
            frame: 0,
            hold_frames,
        }
    }

    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| match self.hold_frames {
                Some(window) => self.frame.saturating_sub(last) <= window,
                None => true,
            })
            .unwrap_or(false)
    }

    fn held_keys(&self) -> Vec<Key> {
        let mut held: Vec<Key> = Vec::new();
        for code in self.key_frame.keys().filter(|code| self.is_held(code)) {
            let key = map_key(code);
            if key != Key::Other && !held.contains(&key) {
                held.push(key);
            }
        }
        held
    }

    fn apply(&mut self, event: KeyEvent, frame: &mut FrameInput) {
        let KeyEvent { code, kind, modifiers, .. } = event;
        match kind {
            KeyEventKind::Press => {
                if is_quit(&code, modifiers) {
                    frame.quit = true;
                    return;
                }
                if !self.is_held(&code) {
                    frame.pressed.push(map_key(&code));
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Forget keys whose hold window ran out so the map stays small.
    fn expire(&mut self) {
        if let Some(window) = self.hold_frames {
            let now = self.frame;
            self.key_frame
                .retain(|_, last| now.saturating_sub(*last) <= window);
        }
    }
}

fn map_key(code: &KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        _ => Key::Other,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        self.frame += 1;
        let mut frame = FrameInput::default();

        // ── Drain all pending events without blocking ─────────────────────────
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.apply(key, &mut frame);
            }
        }

        self.expire();
        frame.held = self.held_keys();
        Ok(frame)
    }
}
