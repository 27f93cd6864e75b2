use std::collections::VecDeque;

use crate::{Coords, GridInt};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector of the direction, with `y` growing downwards.
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords },
    Crashed
}

/// The snake body, head first, plus the growth credits it is still owed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    growth: u32,
}

impl Snake {
    pub fn new(head: Coords, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Snake { body, direction, growth: 0 }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        // The body is never empty: it starts with one cell and only the
        // tail beyond a freshly pushed head is ever removed.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn growth(&self) -> u32 {
        self.growth
    }

    /// Pushes a new head one cell along the current direction.
    ///
    /// Leaving the `size`x`size` grid or running into any current body cell
    /// (the tail included, it has not moved yet) crashes and leaves the body
    /// untouched. The tail is not removed here, see [`Snake::settle_tail`].
    pub fn move_step(&mut self, size: GridInt) -> MoveResult {
        let head = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (head.0 + dx, head.1 + dy);

        if new_head.0 < 0 || new_head.1 < 0 || new_head.0 >= size ||
           new_head.1 >= size || self.body.contains(&new_head) {
               return Crashed;
           }

        self.body.push_front(new_head);
        Moved { new_head }
    }

    pub fn grow(&mut self, credits: u32) {
        self.growth = self.growth.saturating_add(credits);
    }

    /// Finishes a move: spends one growth credit if there is one, otherwise
    /// drops the tail and returns it.
    pub fn settle_tail(&mut self) -> Option<Coords> {
        if self.growth > 0 {
            self.growth -= 1;
            None
        } else {
            self.body.pop_back()
        }
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
