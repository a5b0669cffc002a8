//! Keyboard state
//!
//! Key-down/key-up handlers write here; the game reads one [`TickInput`]
//! snapshot per frame. Everything runs on the browser's single thread, so
//! plain fields suffice.

use std::collections::HashSet;

use crate::sim::{Key, TickInput};

/// Legacy `keyCode` values
const KEY_CODE_LEFT: u32 = 37;
const KEY_CODE_RIGHT: u32 = 39;
const KEY_CODE_SPACE: u32 = 32;

/// Map a DOM `KeyboardEvent` to a logical key
///
/// `name` is `KeyboardEvent.key`; `code` is the legacy `keyCode`, used when
/// the name is not recognised.
pub fn key_from_event(name: &str, code: u32) -> Option<Key> {
    match name {
        "ArrowLeft" | "Left" => Some(Key::Left),
        "ArrowRight" | "Right" => Some(Key::Right),
        " " | "Spacebar" => Some(Key::Fire),
        _ => match code {
            KEY_CODE_LEFT => Some(Key::Left),
            KEY_CODE_RIGHT => Some(Key::Right),
            KEY_CODE_SPACE => Some(Key::Fire),
            _ => None,
        },
    }
}

/// Which logical keys are currently held
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition; returns whether the key is one the game uses
    pub fn handle(&mut self, name: &str, code: u32, down: bool) -> bool {
        let Some(key) = key_from_event(name, code) else {
            return false;
        };
        if down {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
        true
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Forget held keys (the key-up may never arrive after a focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_down(Key::Left),
            right: self.is_down(Key::Right),
            fire: self.is_down(Key::Fire),
        }
    }
}
