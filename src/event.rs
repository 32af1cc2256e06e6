// BearPixel
// copyright bear_pixel developers 2025

//! Input events coming from the host and the per-frame input snapshot.
//!
//! Hosts push `Event`s into `Context::input_events`; once per frame the game
//! folds them into `InputState`, which game objects read during update and
//! draw. Nothing writes the snapshot while a frame is running.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Backspace,
}

impl KeyCode {
    /// letters are stored lowercase so 'W' and 'w' are the same key
    pub fn normalized(self) -> Self {
        match self {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            k => k,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// press without a matching release (hosts that cannot report key
    /// release), the key counts as held for exactly one frame
    KeyTap(KeyCode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: HashSet<KeyCode>,
    tapped: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the snapshot for a new frame from this frame's events.
    /// Taps from the previous frame expire.
    pub fn apply(&mut self, events: &[Event]) {
        self.tapped.clear();
        for e in events {
            match *e {
                Event::KeyDown(k) => {
                    self.held.insert(k.normalized());
                }
                Event::KeyUp(k) => {
                    self.held.remove(&k.normalized());
                }
                Event::KeyTap(k) => {
                    self.tapped.insert(k.normalized());
                }
            }
        }
    }

    pub fn is_down(&self, k: KeyCode) -> bool {
        let k = k.normalized();
        self.held.contains(&k) || self.tapped.contains(&k)
    }

    /// -1, 0 or 1 from a pair of opposing keys
    pub fn axis(&self, neg: KeyCode, pos: KeyCode) -> f64 {
        let mut v = 0.0;
        if self.is_down(neg) {
            v -= 1.0;
        }
        if self.is_down(pos) {
            v += 1.0;
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_up_and_case() {
        let mut s = InputState::new();
        s.apply(&[Event::KeyDown(KeyCode::Char('W'))]);
        assert!(s.is_down(KeyCode::Char('w')));
        s.apply(&[]);
        assert!(s.is_down(KeyCode::Char('w')));
        s.apply(&[Event::KeyUp(KeyCode::Char('w'))]);
        assert!(!s.is_down(KeyCode::Char('W')));
    }

    #[test]
    fn taps_last_one_frame() {
        let mut s = InputState::new();
        s.apply(&[Event::KeyTap(KeyCode::Left)]);
        assert_eq!(s.axis(KeyCode::Left, KeyCode::Right), -1.0);
        s.apply(&[]);
        assert_eq!(s.axis(KeyCode::Left, KeyCode::Right), 0.0);
    }
}
