//! Snake on a fixed grid, with an offline app-shell cache and install/update
//! handling for hosts that serve the game as an installable page.
//!
//! The game itself lives in [`game`] (state and fixed-step update) and
//! [`snake`] (body and movement); [`app`] runs it in a terminal. [`shell`] and
//! [`update`] are independent of the game and of each other, apart from the
//! single [`shell::WorkerMessage`] the controller posts to the worker.

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod score;
pub mod shell;
pub mod snake;
pub mod term;
pub mod update;

pub use config::{Config, GameConfig};
pub use error::{Error, Result};
pub use game::{Frame, GameState, Status, Step};

pub type GridInt = i16;
/// A grid cell, `(x, y)` with the origin at the top left.
pub type Coords = (GridInt, GridInt);
/// A terminal position, `(column, row)`.
pub type ScreenPos = (u16, u16);
