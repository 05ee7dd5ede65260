/// Input collaborator — what the game needs to know about the keyboard
/// for a single tick, independent of where the keys come from.

use std::io;

/// The keys the game distinguishes.  Anything else maps to `Other`, which
/// still counts as "a key was pressed" on the menu and game-over screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Other,
}

/// Snapshot of the keyboard for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Keys currently held down (level-triggered).
    pub held: Vec<Key>,
    /// Keys that went down during this tick (edge-triggered).
    pub pressed: Vec<Key>,
    /// The player asked to leave the program.
    pub quit: bool,
}

impl FrameInput {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    // Builder helpers, mostly for scripted input.

    pub fn holding(mut self, key: Key) -> Self {
        self.held.push(key);
        self
    }

    pub fn pressing(mut self, key: Key) -> Self {
        self.pressed.push(key);
        self
    }

    pub fn quitting() -> Self {
        FrameInput {
            quit: true,
            ..FrameInput::default()
        }
    }
}

/// Anything that can be sampled once per tick for a `FrameInput`.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<FrameInput>;
}
