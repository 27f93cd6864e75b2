//! Keyboard and pointer input, turned into game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::snake::Direction::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    Quit,
}

pub fn from_key(ev: &KeyEvent) -> Option<Command> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// An on-screen control occupying `label.len()` columns of one terminal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub column: u16,
    pub row: u16,
    pub command: Command,
}

impl Button {
    pub fn width(&self) -> u16 {
        self.label.chars().count() as u16
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.row && column >= self.column && column < self.column + self.width()
    }
}

const BUTTON_GAP: u16 = 1;

const BUTTONS: [(&str, Command); 6] = [
    ("[ Up ]", Command::Steer(Up)),
    ("[Left]", Command::Steer(Left)),
    ("[Down]", Command::Steer(Down)),
    ("[Right]", Command::Steer(Right)),
    ("[Pause]", Command::TogglePause),
    ("[Restart]", Command::Restart),
];

/// The row of pointer controls drawn under the board.
#[derive(Debug, Clone)]
pub struct ButtonBar {
    buttons: Vec<Button>,
}

impl ButtonBar {
    pub fn new(left: u16, row: u16) -> Self {
        let mut column = left;
        let buttons = BUTTONS.iter()
            .map(|&(label, command)| {
                let button = Button { label, column, row, command };
                column += button.width() + BUTTON_GAP;
                button
            })
            .collect();
        ButtonBar { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Total width of the bar, in columns.
    pub fn width(&self) -> u16 {
        match (self.buttons.first(), self.buttons.last()) {
            (Some(first), Some(last)) => last.column + last.width() - first.column,
            _ => 0,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Command> {
        self.buttons.iter().find(|b| b.contains(column, row)).map(|b| b.command)
    }

    /// Maps a left click on one of the buttons to its command.
    pub fn on_mouse(&self, ev: &MouseEvent) -> Option<Command> {
        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => self.hit(ev.column, ev.row),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(from_key(&key(KeyCode::Up)), Some(Command::Steer(Up)));
        assert_eq!(from_key(&key(KeyCode::Char('w'))), Some(Command::Steer(Up)));
        assert_eq!(from_key(&key(KeyCode::Left)), Some(Command::Steer(Left)));
        assert_eq!(from_key(&key(KeyCode::Char('a'))), Some(Command::Steer(Left)));
        assert_eq!(from_key(&key(KeyCode::Down)), Some(Command::Steer(Down)));
        assert_eq!(from_key(&key(KeyCode::Char('s'))), Some(Command::Steer(Down)));
        assert_eq!(from_key(&key(KeyCode::Right)), Some(Command::Steer(Right)));
        assert_eq!(from_key(&key(KeyCode::Char('d'))), Some(Command::Steer(Right)));
    }

    #[test]
    fn pause_restart_quit() {
        assert_eq!(from_key(&key(KeyCode::Char(' '))), Some(Command::TogglePause));
        assert_eq!(from_key(&key(KeyCode::Char('r'))), Some(Command::Restart));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(from_key(&ctrl_c), Some(Command::Quit));
        assert_eq!(from_key(&key(KeyCode::Char('c'))), None);
        assert_eq!(from_key(&key(KeyCode::Esc)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut ev = key(KeyCode::Up);
        ev.kind = KeyEventKind::Release;
        assert_eq!(from_key(&ev), None);
    }

    #[test]
    fn buttons_are_laid_out_left_to_right() {
        let bar = ButtonBar::new(2, 30);
        let buttons = bar.buttons();
        assert_eq!(buttons[0].column, 2);
        assert_eq!(buttons[1].column, 2 + 6 + 1);
        assert!(buttons.iter().all(|b| b.row == 30));
        assert_eq!(bar.width(), 6 + 6 + 6 + 7 + 7 + 9 + 5);
    }

    #[test]
    fn hit_testing() {
        let bar = ButtonBar::new(0, 5);
        assert_eq!(bar.hit(0, 5), Some(Command::Steer(Up)));
        assert_eq!(bar.hit(5, 5), Some(Command::Steer(Up)));
        assert_eq!(bar.hit(6, 5), None);
        assert_eq!(bar.hit(7, 5), Some(Command::Steer(Left)));
        assert_eq!(bar.hit(7, 4), None);

        let restart = &bar.buttons()[5];
        assert_eq!(bar.hit(restart.column + 3, 5), Some(Command::Restart));
    }

    #[test]
    fn only_left_clicks_count() {
        let bar = ButtonBar::new(0, 5);
        let click = |kind| MouseEvent { kind, column: 1, row: 5, modifiers: KeyModifiers::NONE };
        assert_eq!(bar.on_mouse(&click(MouseEventKind::Down(MouseButton::Left))), Some(Command::Steer(Up)));
        assert_eq!(bar.on_mouse(&click(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(bar.on_mouse(&click(MouseEventKind::Moved)), None);
    }
}
