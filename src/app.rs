use std::{thread::sleep, time::{Duration, Instant}};

use crossterm::event::Event;
use crossterm::style::Color;
use log::{info, warn};

use crate::config::Config;
use crate::game::{Frame, GameState, Status, Step};
use crate::input::{self, ButtonBar, Command};
use crate::score::ScoreFile;
use crate::term::TermManager;
use crate::{Coords, Error, Result, ScreenPos};

const CELL_WIDTH: u16 = 2;
const BOARD_TOP: u16 = 1;

const EMPTY_CELL: &str = "  ";
const BODY_CELL: &str = "[]";
const APPLE_CELL: &str = "()";

const SNAKE_COLOR: Color = Color::DarkGreen;
const HEAD_COLOR: Color = Color::Green;
const APPLE_COLOR: Color = Color::Red;
const DEAD_COLOR: Color = Color::DarkGrey;
const HUD_COLOR: Color = Color::Yellow;
const BUTTON_COLOR: Color = Color::Cyan;

/// Where things go on screen for a given grid size.
#[derive(Debug, Clone)]
struct Layout {
    grid_size: u16,
    buttons: ButtonBar,
}

impl Layout {
    fn new(grid_size: u16) -> Self {
        let buttons_row = BOARD_TOP + grid_size + 2;
        Layout { grid_size, buttons: ButtonBar::new(0, buttons_row) }
    }

    fn board_width(&self) -> u16 {
        self.grid_size * CELL_WIDTH + 2
    }

    fn board_height(&self) -> u16 {
        self.grid_size + 2
    }

    /// Columns and rows the whole screen needs: HUD, board, buttons.
    fn needed(&self) -> ScreenPos {
        (self.board_width().max(self.buttons.width()), self.board_height() + 2)
    }

    fn cell_pos(&self, cell: Coords) -> ScreenPos {
        (1 + cell.0 as u16 * CELL_WIDTH, BOARD_TOP + 1 + cell.1 as u16)
    }

    fn board_center(&self) -> ScreenPos {
        (self.board_width() / 2, BOARD_TOP + self.board_height() / 2)
    }
}

pub struct SnakeGame {
    term: TermManager,
    state: GameState,
    scores: ScoreFile,
    layout: Layout,
    frame_interval: Duration,
    /// A message box may be wider than the board; it is cleared once the
    /// status no longer calls for it.
    message_shown: bool,
}

impl SnakeGame {
    pub fn new(config: Config, scores: ScoreFile, best: u32) -> Result<Self> {
        let term = TermManager::new()?;
        let layout = Layout::new(config.game.grid_size as u16);

        let (cols, rows) = term.get_terminal_size();
        let (needed_cols, needed_rows) = layout.needed();
        if cols < needed_cols || rows < needed_rows {
            return Err(Error::TerminalTooSmall { needed_cols, needed_rows, cols, rows });
        }

        Ok(SnakeGame {
            term,
            state: GameState::new(config.game, best),
            scores,
            layout,
            frame_interval: Duration::from_millis(config.frame_interval_ms),
            message_shown: false,
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    /// Shows the controls and waits for a key. Returns `false` on CTRL+C.
    pub fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Space to pause, R to restart",
            "or click the buttons below",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.redraw()?;
        self.term.show_message(self.layout.board_center(), lines)?;
        self.message_shown = true;

        loop {
            if let Event::Key(ev) = self.term.read_event_blocking()? {
                return Ok(!input::is_ctrl_c(&ev));
            }
        }
    }

    /// Runs rounds until the player quits.
    pub fn play(&mut self) -> Result<()> {
        let clock = Instant::now();
        self.redraw()?;

        loop {
            sleep(self.frame_interval);

            for ev in self.term.read_events_queue()? {
                let command = match &ev {
                    Event::Key(key) => input::from_key(key),
                    Event::Mouse(mouse) => self.layout.buttons.on_mouse(mouse),
                    Event::Resize(..) => {
                        self.term.clear()?;
                        self.redraw()?;
                        None
                    }
                    _ => None,
                };

                match command {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Steer(dir)) => {
                        self.state.steer(dir);
                    }
                    Some(Command::TogglePause) => {
                        self.state.toggle_pause();
                        self.redraw()?;
                    }
                    Some(Command::Restart) => {
                        self.state.restart();
                        self.redraw()?;
                    }
                    None => {}
                }
            }

            if let Frame::Stepped(step) = self.state.frame(clock.elapsed()) {
                record_best(&self.scores, &step);
                self.redraw()?;
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn redraw(&mut self) -> Result<()> {
        let message = message_for(&self.state);
        if self.message_shown && message.is_none() {
            self.term.clear()?;
        }

        self.print_hud()?;
        self.term.draw_box((0, BOARD_TOP), self.layout.board_width(), self.layout.board_height())?;
        self.print_board()?;
        self.print_buttons()?;

        match &message {
            None => self.term.flush()?,
            Some(lines) => {
                let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
                self.term.show_message(self.layout.board_center(), &lines)?;
            }
        }
        self.message_shown = message.is_some();

        Ok(())
    }

    fn print_hud(&mut self) -> Result<()> {
        let hud = format!(
            "Score: {:<4} Best: {:<4} Speed: {:<3}",
            self.state.score(),
            self.state.best(),
            self.state.speed()
        );
        self.term.print_str_at((0, 0), &hud, HUD_COLOR)?;
        Ok(())
    }

    fn print_board(&mut self) -> Result<()> {
        let row = EMPTY_CELL.repeat(self.layout.grid_size as usize);
        for y in 0..self.layout.grid_size {
            self.term.print_str_at((1, BOARD_TOP + 1 + y), &row, Color::Reset)?;
        }

        if let Some(apple) = self.state.apple() {
            self.term.print_str_at(self.layout.cell_pos(apple), APPLE_CELL, APPLE_COLOR)?;
        }

        let dead = matches!(self.state.status(), Status::GameOver { won: false });
        let snake = self.state.snake();
        let head = snake.head_char().to_string().repeat(CELL_WIDTH as usize);

        for (i, pos) in snake.body().iter().enumerate() {
            let (cell, color) = match (i, dead) {
                (_, true) => ("XX", DEAD_COLOR),
                (0, false) => (head.as_str(), HEAD_COLOR),
                _ => (BODY_CELL, SNAKE_COLOR),
            };
            self.term.print_str_at(self.layout.cell_pos(*pos), cell, color)?;
        }

        Ok(())
    }

    fn print_buttons(&mut self) -> Result<()> {
        for button in self.layout.buttons.buttons() {
            self.term.print_str_at((button.column, button.row), button.label, BUTTON_COLOR)?;
        }

        Ok(())
    }
}

/// Lines of the box drawn over the board, if the status calls for one.
fn message_for(state: &GameState) -> Option<Vec<String>> {
    match state.status() {
        Status::Running => None,
        Status::Paused => Some(vec!["Paused".into(), "Space to resume".into()]),
        Status::GameOver { won } => {
            let title = if won {"You won!"} else {"Game Over"};
            Some(vec![
                title.into(),
                format!("Score: {}", state.score()),
                String::new(),
                "Press R to restart".into(),
            ])
        }
    }
}

/// Saves the best score when `step` ended a round with a new record.
/// Returns `true` once it is on disk. A failed save is logged and play goes on.
fn record_best(scores: &ScoreFile, step: &Step) -> bool {
    let best = match *step {
        Step::GameOver { best, new_best: true, .. } => best,
        _ => return false,
    };

    match scores.save(best) {
        Ok(()) => {
            info!("new best score {} saved to {}", best, scores.path().display());
            true
        }
        Err(e) => {
            warn!("could not save best score: {}", e);
            false
        }
    }
}
