//! Mapping between the task service's free-form status strings and the three
//! board columns.
//!
//! The mapping is many-to-one. [`StatusMapper::to_column`] accepts any synonym
//! while [`StatusMapper::to_raw_status`] always writes the single canonical
//! literal of a column, so `to_raw_status(to_column(s))` is not `s` in general
//! ("done" reads as Completed and is written back as "Completed").
//!
//! Each column's written literal always counts as one of its synonyms, so a
//! status written by the board reads back into the same column unless another
//! column's list claims it first ([`StatusMapper::check_round_trip`]).

use crate::domain::board::Column;
use serde::{Deserialize, Serialize};

/// Status vocabulary used by the task service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusVocabulary {
    pub todo: Vec<String>,
    pub in_progress: Vec<String>,
    pub completed: Vec<String>,
    /// Raw status written when a task lands in To Do
    pub todo_status: String,
    /// Raw status written when a task lands in In Progress
    pub in_progress_status: String,
    /// Raw status written when a task lands in Completed
    pub completed_status: String,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            todo: words(&["pending", "not started", "todo", "to do", "open", "new"]),
            in_progress: words(&["in progress", "inprogress", "working", "started", "ongoing"]),
            completed: words(&["completed", "complete", "done", "finished"]),
            todo_status: "Pending".to_string(),
            in_progress_status: "In Progress".to_string(),
            completed_status: "Completed".to_string(),
        }
    }
}

/// Bidirectional status lookup built from a [`StatusVocabulary`]
#[derive(Debug, Clone)]
pub struct StatusMapper {
    todo: Vec<String>,
    in_progress: Vec<String>,
    completed: Vec<String>,
    raw: [String; 3],
}

impl StatusMapper {
    pub fn new(vocabulary: &StatusVocabulary) -> Self {
        let normalized = |list: &[String], literal: &str| -> Vec<String> {
            let mut words: Vec<String> = list.iter().map(|s| normalize(s)).collect();
            let literal = normalize(literal);
            if !words.contains(&literal) {
                words.push(literal);
            }
            words
        };
        Self {
            todo: normalized(&vocabulary.todo, &vocabulary.todo_status),
            in_progress: normalized(&vocabulary.in_progress, &vocabulary.in_progress_status),
            completed: normalized(&vocabulary.completed, &vocabulary.completed_status),
            raw: [
                vocabulary.todo_status.clone(),
                vocabulary.in_progress_status.clone(),
                vocabulary.completed_status.clone(),
            ],
        }
    }

    /// Column for a raw status.
    ///
    /// Matching ignores case, surrounding whitespace, and `-`/`_` separators.
    /// Anything not recognised as In Progress or Completed lands in To Do, so
    /// an unknown status never drops a task off the board.
    pub fn to_column(&self, raw_status: &str) -> Column {
        let status = normalize(raw_status);
        if self.in_progress.contains(&status) {
            Column::InProgress
        } else if self.completed.contains(&status) {
            Column::Completed
        } else {
            Column::ToDo
        }
    }

    /// Whether the status is one of the known synonyms of any column
    pub fn is_recognized(&self, raw_status: &str) -> bool {
        let status = normalize(raw_status);
        [&self.todo, &self.in_progress, &self.completed]
            .iter()
            .any(|list| list.contains(&status))
    }

    /// Raw status literal written for a column
    pub fn to_raw_status(&self, column: Column) -> &str {
        &self.raw[column.index()]
    }

    /// Finds a column whose written literal reads back as a different column.
    ///
    /// Returns the column, its literal, and the column it maps to instead.
    pub fn check_round_trip(&self) -> Option<(Column, &str, Column)> {
        Column::ALL.into_iter().find_map(|column| {
            let literal = self.to_raw_status(column);
            let read_back = self.to_column(literal);
            (read_back != column).then_some((column, literal, read_back))
        })
    }
}

impl Default for StatusMapper {
    fn default() -> Self {
        Self::new(&StatusVocabulary::default())
    }
}

fn normalize(status: &str) -> String {
    status
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
