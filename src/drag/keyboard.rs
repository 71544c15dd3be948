use crate::{
    domain::{Board, Column},
    drag::collision::TargetId,
};

/// Arrow key direction during a keyboard drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Slot the keyboard cursor points at while a card is lifted.
///
/// `index` ranges over `0..=len` of the column. An index inside the column
/// targets the task at that position; `len` targets the column itself, which
/// drops at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardCursor {
    pub column: Column,
    pub index: usize,
}

impl KeyboardCursor {
    pub fn new(column: Column, index: usize) -> Self {
        Self { column, index }
    }

    /// Moves the cursor one step, clamping at the board edges
    pub fn nudge(&mut self, direction: Direction, board: &Board) {
        match direction {
            Direction::Up => self.index = self.index.saturating_sub(1),
            Direction::Down => self.index = (self.index + 1).min(board.column(self.column).len()),
            Direction::Left => self.switch_column(self.column.prev(), board),
            Direction::Right => self.switch_column(self.column.next(), board),
        }
    }

    fn switch_column(&mut self, column: Option<Column>, board: &Board) {
        if let Some(column) = column {
            self.column = column;
            self.index = self.index.min(board.column(column).len());
        }
    }

    /// Drop target under the cursor
    pub fn target(&self, board: &Board) -> TargetId {
        match board.column(self.column).get(self.index) {
            Some(id) => TargetId::Task(id.clone()),
            None => TargetId::Column(self.column),
        }
    }
}
