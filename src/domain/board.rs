use crate::{
    domain::task::{Task, TaskId},
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// One of the three canonical board columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    ToDo,
    InProgress,
    Completed,
}

impl Column {
    /// All columns in display order
    pub const ALL: [Column; 3] = [Column::ToDo, Column::InProgress, Column::Completed];

    pub fn index(self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    /// Column to the left, if any
    pub fn prev(self) -> Option<Column> {
        match self {
            Self::ToDo => None,
            Self::InProgress => Some(Self::ToDo),
            Self::Completed => Some(Self::InProgress),
        }
    }

    /// Column to the right, if any
    pub fn next(self) -> Option<Column> {
        match self {
            Self::ToDo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToDo => write!(f, "To Do"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Ordered task ids per column.
///
/// Every task id lives in exactly one column. Boards are built by
/// [`project`](crate::domain::projection::project) and only changed through
/// [`Board::reorder`] and [`Board::move_task`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: [Vec<TaskId>; 3],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered task ids in a column
    pub fn column(&self, column: Column) -> &[TaskId] {
        &self.columns[column.index()]
    }

    /// Iterates columns in display order with their task ids
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[TaskId])> {
        Column::ALL.into_iter().map(move |c| (c, self.column(c)))
    }

    /// Finds the column holding a task
    pub fn column_of(&self, id: &TaskId) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|c| self.columns[c.index()].contains(id))
    }

    /// Finds the column and index of a task
    pub fn position(&self, id: &TaskId) -> Option<(Column, usize)> {
        Column::ALL.into_iter().find_map(|c| {
            self.columns[c.index()]
                .iter()
                .position(|t| t == id)
                .map(|i| (c, i))
        })
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.column_of(id).is_some()
    }

    /// Total number of tasks on the board
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, column: Column, id: TaskId) {
        self.columns[column.index()].push(id);
    }

    pub(crate) fn column_mut(&mut self, column: Column) -> &mut Vec<TaskId> {
        &mut self.columns[column.index()]
    }

    /// Moves the task at `from` to `to` within one column.
    ///
    /// Same semantics as removing the element and re-inserting it, so `to` is
    /// the final index of the task. Out of range indexes are clamped.
    pub fn reorder(&mut self, column: Column, from: usize, to: usize) -> Result<()> {
        let ids = &mut self.columns[column.index()];
        if from >= ids.len() {
            return Err(BoardError::TaskNotFound(format!(
                "index {} in column {}",
                from, column
            )));
        }

        let id = ids.remove(from);
        let to = to.min(ids.len());
        ids.insert(to, id);
        Ok(())
    }

    /// Removes a task from `from` and inserts it into `to` at `index`, or at
    /// the end when `index` is `None` or past the end.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        from: Column,
        to: Column,
        index: Option<usize>,
    ) -> Result<()> {
        if from == to {
            return Err(BoardError::SameColumn(from));
        }

        let source = &mut self.columns[from.index()];
        let pos = source
            .iter()
            .position(|t| t == id)
            .ok_or_else(|| BoardError::TaskNotInColumn {
                task: id.to_string(),
                column: from,
            })?;
        let id = source.remove(pos);

        let target = &mut self.columns[to.index()];
        let index = index.unwrap_or(target.len()).min(target.len());
        target.insert(index, id);
        Ok(())
    }

    /// Checks that the columns are pairwise disjoint, contain no duplicates,
    /// and together hold exactly the ids of `tasks`.
    pub fn is_partition_of(&self, tasks: &[Task]) -> bool {
        let mut seen = HashSet::new();
        for id in self.columns.iter().flatten() {
            if !seen.insert(id) {
                return false;
            }
        }

        let expected: HashSet<&TaskId> = tasks.iter().map(|t| &t.id).collect();
        seen == expected
    }
}
