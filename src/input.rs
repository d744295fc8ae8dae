//! Logical input events delivered to the fishing stages.
//!
//! The frontend maps raw device keys onto these five codes; stages never see
//! anything else.

use serde::{Deserialize, Serialize};

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyKind {
    Down,
    Up,
}

/// The logical keys the stages understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Space / Enter: cast, strike, hold the line.
    Confirm,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    /// The four arrow directions used by the reeling rhythm.
    pub const DIRECTIONS: [KeyCode; 4] = [KeyCode::Left, KeyCode::Right, KeyCode::Up, KeyCode::Down];

    pub fn is_direction(&self) -> bool {
        !matches!(self, KeyCode::Confirm)
    }
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: KeyKind,
    pub code: KeyCode,
}

impl InputEvent {
    pub fn press(code: KeyCode) -> Self {
        Self {
            kind: KeyKind::Down,
            code,
        }
    }

    pub fn release(code: KeyCode) -> Self {
        Self {
            kind: KeyKind::Up,
            code,
        }
    }

    /// True for a key-down of `code`.
    pub fn is_press_of(&self, code: KeyCode) -> bool {
        self.kind == KeyKind::Down && self.code == code
    }
}
