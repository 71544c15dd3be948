//! Drag interaction state machine.
//!
//! `Idle -> Pressed -> Dragging -> (resolved) -> Idle` for pointer input and
//! `Idle -> Dragging -> (resolved) -> Idle` for keyboard input. A press that
//! never travels past the activation distance is reported as a click. Only one
//! session exists at a time, and every drop or cancel returns to `Idle`.

pub mod collision;
pub mod keyboard;

use crate::{
    config::BoardConfig,
    domain::{Board, Column, TaskId},
};
use collision::{resolve_collision, DropTarget, Point, Rect, TargetId};
use keyboard::{Direction, KeyboardCursor};
use serde::{Deserialize, Serialize};
use std::mem;
use tracing::debug;

/// A cross-column move handed to the [`Mutator`](crate::mutator::Mutator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub task_id: TaskId,
    pub from: Column,
    pub to: Column,
    /// Insertion index in the target column; `None` appends
    pub index: Option<usize>,
}

/// Result of ending a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released before the activation distance was reached
    Click(TaskId),
    /// Cancelled, or dropped where there is no valid target
    Cancelled,
    /// The event does not belong to the active session; nothing changed
    Ignored,
    /// Same-column reorder, already applied to the board
    Reordered {
        task_id: TaskId,
        column: Column,
        from: usize,
        to: usize,
    },
    /// Cross-column move, not yet applied
    Move(MoveRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragInput {
    Pointer,
    Keyboard,
}

/// Externally visible phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

/// An active drag gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub task_id: TaskId,
    /// Column the drag started in
    pub source: Column,
    pub input: DragInput,
    origin: Point,
    card: Rect,
    pointer: Point,
    cursor: Option<KeyboardCursor>,
}

impl DragSession {
    /// Card rectangle following the pointer
    pub fn dragged_rect(&self) -> Rect {
        self.card
            .translate(self.pointer.x - self.origin.x, self.pointer.y - self.origin.y)
    }

    pub fn cursor(&self) -> Option<KeyboardCursor> {
        self.cursor
    }
}

#[derive(Debug, Clone)]
struct PressedCard {
    task_id: TaskId,
    source: Column,
    origin: Point,
    card: Rect,
}

impl PressedCard {
    fn into_session(self, pointer: Point) -> DragSession {
        DragSession {
            task_id: self.task_id,
            source: self.source,
            input: DragInput::Pointer,
            origin: self.origin,
            card: self.card,
            pointer,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Pressed(PressedCard),
    Dragging(DragSession),
}

#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    activation_distance: f64,
}

impl DragController {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            state: DragState::Idle,
            activation_distance,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.activation_distance)
    }

    pub fn phase(&self) -> DragPhase {
        match self.state {
            DragState::Idle => DragPhase::Idle,
            DragState::Pressed(_) => DragPhase::Pressed,
            DragState::Dragging(_) => DragPhase::Dragging,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Records a press on a card. Returns false when a gesture is already in
    /// progress or the task is not on the board.
    pub fn pointer_down(&mut self, task_id: TaskId, at: Point, card: Rect, board: &Board) -> bool {
        if !matches!(self.state, DragState::Idle) {
            debug!(task = %task_id, "pointer down ignored; gesture already active");
            return false;
        }
        let Some(source) = board.column_of(&task_id) else {
            debug!(task = %task_id, "pointer down on unknown task");
            return false;
        };

        self.state = DragState::Pressed(PressedCard {
            task_id,
            source,
            origin: at,
            card,
        });
        true
    }

    /// Tracks pointer travel. Returns true while a pointer drag is active.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        match &mut self.state {
            DragState::Pressed(pressed) => {
                if pressed.origin.distance_to(at) < self.activation_distance {
                    return false;
                }
                debug!(task = %pressed.task_id, column = %pressed.source, "drag started");
                self.state = DragState::Dragging(pressed.clone().into_session(at));
                true
            }
            DragState::Dragging(session) if session.input == DragInput::Pointer => {
                session.pointer = at;
                true
            }
            _ => false,
        }
    }

    /// Ends a pointer gesture at `at`, resolving the drop against `targets`.
    ///
    /// Same-column reorders are applied to `board` before returning.
    pub fn pointer_up(&mut self, at: Point, targets: &[DropTarget], board: &mut Board) -> DropOutcome {
        match mem::take(&mut self.state) {
            DragState::Idle => DropOutcome::Ignored,
            DragState::Pressed(pressed) => {
                if pressed.origin.distance_to(at) < self.activation_distance {
                    return DropOutcome::Click(pressed.task_id);
                }
                // Released far away without any move event in between
                let session = pressed.into_session(at);
                let over = resolve_collision(&session.dragged_rect(), targets).cloned();
                finish(session, over, board)
            }
            DragState::Dragging(mut session) if session.input == DragInput::Pointer => {
                session.pointer = at;
                let over = resolve_collision(&session.dragged_rect(), targets).cloned();
                finish(session, over, board)
            }
            keyboard => {
                self.state = keyboard;
                DropOutcome::Ignored
            }
        }
    }

    /// Lifts a card with the keyboard; no activation distance applies
    pub fn key_pick_up(&mut self, task_id: TaskId, board: &Board) -> bool {
        if !matches!(self.state, DragState::Idle) {
            return false;
        }
        let Some((source, index)) = board.position(&task_id) else {
            return false;
        };

        debug!(task = %task_id, column = %source, "keyboard drag started");
        self.state = DragState::Dragging(DragSession {
            task_id,
            source,
            input: DragInput::Keyboard,
            origin: Point::default(),
            card: Rect::default(),
            pointer: Point::default(),
            cursor: Some(KeyboardCursor::new(source, index)),
        });
        true
    }

    /// Moves the keyboard cursor of the lifted card
    pub fn key_nudge(&mut self, direction: Direction, board: &Board) -> bool {
        match &mut self.state {
            DragState::Dragging(DragSession {
                cursor: Some(cursor),
                ..
            }) => {
                cursor.nudge(direction, board);
                true
            }
            _ => false,
        }
    }

    /// Drops the lifted card at the keyboard cursor
    pub fn key_drop(&mut self, board: &mut Board) -> DropOutcome {
        match mem::take(&mut self.state) {
            DragState::Dragging(session) if session.input == DragInput::Keyboard => {
                let over = session.cursor.map(|cursor| cursor.target(board));
                finish(session, over, board)
            }
            other => {
                self.state = other;
                DropOutcome::Ignored
            }
        }
    }

    /// Abandons any gesture without touching the board
    pub fn cancel(&mut self) -> DropOutcome {
        match mem::take(&mut self.state) {
            DragState::Idle => DropOutcome::Ignored,
            DragState::Pressed(_) => DropOutcome::Cancelled,
            DragState::Dragging(session) => {
                debug!(task = %session.task_id, "drag cancelled");
                DropOutcome::Cancelled
            }
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default())
    }
}

fn finish(session: DragSession, over: Option<TargetId>, board: &mut Board) -> DropOutcome {
    let Some(over) = over else {
        debug!(task = %session.task_id, "dropped outside any target");
        return DropOutcome::Cancelled;
    };
    let Some((current, from)) = board.position(&session.task_id) else {
        debug!(task = %session.task_id, "dragged task left the board");
        return DropOutcome::Cancelled;
    };
    if current != session.source {
        debug!(
            task = %session.task_id,
            started = %session.source,
            now = %current,
            "task changed column during drag"
        );
    }

    let (target, index) = match &over {
        TargetId::Column(column) => (*column, None),
        TargetId::Task(id) => match board.position(id) {
            Some((column, index)) => (column, Some(index)),
            None => return DropOutcome::Cancelled,
        },
    };

    if target != current {
        debug!(task = %session.task_id, from = %current, to = %target, "drop resolved to move");
        return DropOutcome::Move(MoveRequest {
            task_id: session.task_id,
            from: current,
            to: target,
            index,
        });
    }

    let to = index.unwrap_or_else(|| board.column(target).len().saturating_sub(1));
    if let Err(e) = board.reorder(target, from, to) {
        debug!(task = %session.task_id, error = %e, "reorder failed");
        return DropOutcome::Cancelled;
    }
    debug!(task = %session.task_id, column = %target, from, to, "drop resolved to reorder");

    DropOutcome::Reordered {
        task_id: session.task_id,
        column: target,
        from,
        to,
    }
}
