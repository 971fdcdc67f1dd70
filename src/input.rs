//! Raw input -> `Action`
//!
//! Three surfaces feed the same three actions: keyboard codes, clicks on the
//! play field (touch zones) and the on-screen button row.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};

use crate::sim::Action;

pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Jump),
        _ => None,
    }
}

/// Classify a click on the field: left third, middle (jump), right third
pub fn action_for_touch(field: Rect, column: u16, row: u16) -> Option<Action> {
    if field.width == 0 || !field.contains(Position::new(column, row)) {
        return None;
    }
    let third = (column - field.x) as u32 * 3 / field.width as u32;
    match third {
        0 => Some(Action::MoveLeft),
        1 => Some(Action::Jump),
        _ => Some(Action::MoveRight),
    }
}

/// Screen areas of the `◀ ▲ ▶` buttons, filled in when the play screen renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchButtons {
    pub left: Rect,
    pub jump: Rect,
    pub right: Rect,
}

impl TouchButtons {
    /// Split a row into three equal buttons
    pub fn layout(area: Rect) -> Self {
        let w = area.width / 3;
        Self {
            left: Rect::new(area.x, area.y, w, area.height),
            jump: Rect::new(area.x + w, area.y, w, area.height),
            right: Rect::new(area.x + 2 * w, area.y, area.width - 2 * w, area.height),
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Action> {
        let pos = Position::new(column, row);
        if self.left.contains(pos) {
            Some(Action::MoveLeft)
        } else if self.jump.contains(pos) {
            Some(Action::Jump)
        } else if self.right.contains(pos) {
            Some(Action::MoveRight)
        } else {
            None
        }
    }
}
