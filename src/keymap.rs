//! Keyboard handling for the grid
//!
//! A [`Keystroke`] maps to a [`GridMsg`] depending on whether a cell is
//! being edited:
//!
//! ```text
//! Keystroke → grid_msg_for(keystroke, editing) → Option<GridMsg>
//! ```
//!
//! While selected, arrows and Tab move the selection and Enter starts an
//! edit. While editing, Left/Right/Home/End move the draft cursor, Enter
//! and Tab commit, Escape discards, and Up/Down do nothing.

use std::fmt;

use crate::messages::{Direction, GridMsg};

/// Modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ctrl or Meta held: the keystroke is a shortcut, not text input
    #[inline]
    pub const fn is_shortcut(self) -> bool {
        self.ctrl() || self.meta()
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.ctrl(), "Ctrl"),
            (self.shift(), "Shift"),
            (self.alt(), "Alt"),
            (self.meta(), "Meta"),
        ];
        let held: Vec<&str> = names
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", held.join("+"))
    }
}

/// Keys the grid reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, case preserved
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
        }
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// A keystroke with no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Typed character; shift is implied by the character itself
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}

/// Translate a keystroke into a grid message.
///
/// Shortcuts (Ctrl/Meta held) are left to the host, as is Shift+Tab.
pub fn grid_msg_for(keystroke: Keystroke, editing: bool) -> Option<GridMsg> {
    if keystroke.mods.is_shortcut() {
        return None;
    }
    let shift = keystroke.mods.shift();

    match (keystroke.key, editing) {
        (KeyCode::Tab, _) if shift => None,

        // Selected
        (KeyCode::Up, false) => Some(GridMsg::Move(Direction::Up)),
        (KeyCode::Down, false) => Some(GridMsg::Move(Direction::Down)),
        (KeyCode::Left, false) => Some(GridMsg::Move(Direction::Left)),
        (KeyCode::Right, false) => Some(GridMsg::Move(Direction::Right)),
        (KeyCode::Tab, false) => Some(GridMsg::NextCell),
        (KeyCode::Enter, false) => Some(GridMsg::StartEditing),

        // Editing
        (KeyCode::Enter, true) => Some(GridMsg::ConfirmEdit),
        (KeyCode::Tab, true) => Some(GridMsg::ConfirmEditAndAdvance),
        (KeyCode::Escape, true) => Some(GridMsg::CancelEdit),
        (KeyCode::Left, true) => Some(GridMsg::EditCursorLeft),
        (KeyCode::Right, true) => Some(GridMsg::EditCursorRight),
        (KeyCode::Home, true) => Some(GridMsg::EditCursorHome),
        (KeyCode::End, true) => Some(GridMsg::EditCursorEnd),
        (KeyCode::Backspace, true) => Some(GridMsg::EditDeleteBackward),
        (KeyCode::Delete, true) => Some(GridMsg::EditDeleteForward),
        (KeyCode::Char(ch), true) => Some(GridMsg::EditInsertChar(ch)),

        _ => None,
    }
}
