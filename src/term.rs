use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, poll, read};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::ScreenPos;

/// Thin wrapper over the terminal: raw mode, cursor moves and a centered
/// message box.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
    }

    pub fn read_event_blocking(&self) -> io::Result<Event> {
        read()
    }

    /// Drains every event already waiting, without blocking.
    pub fn read_events_queue(&self) -> io::Result<Vec<Event>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            events.push(read()?);
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> ScreenPos {
        (self.width, self.height)
    }

    pub fn draw_box(&mut self, top_left: ScreenPos, width: u16, height: u16) -> io::Result<()> {
        let (left, top) = top_left;
        let end_x = left + width - 1;
        let end_y = top + height - 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    /// Prints `lines` centered in a padded box over whatever is on screen.
    /// The caller redraws the area underneath to get rid of it.
    pub fn show_message(&mut self, center: ScreenPos, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        self.print_str_at(top_left, &blank, Color::Reset)?;
        self.print_str_at((top_left.0, top_left.1 + msg_height - 1), &blank, Color::Reset)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            self.print_str_at((top_left.0, y), &padded_line, Color::White)?;
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: ScreenPos, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    pub fn print_str_at(&mut self, pos: ScreenPos, s: &str, color: Color) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color),
            style::Print(s),
            style::ResetColor
        )
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}
