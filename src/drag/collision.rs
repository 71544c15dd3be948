//! Drop target geometry and collision resolution.
//!
//! A column's rectangle always contains the cards rendered inside it, so a
//! dragged card usually overlaps both. Column targets are therefore tested
//! first; task targets are only considered when no column intersects at all.

use crate::domain::{Column, TaskId};
use serde::{Deserialize, Serialize};

/// A point in board coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned rectangle in board coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// The same rectangle shifted by `dx`, `dy`
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let left = self.x.max(other.x);
        let right = (self.x + self.width).min(other.x + other.width);
        let top = self.y.max(other.y);
        let bottom = (self.y + self.height).min(other.y + other.height);

        if right <= left || bottom <= top {
            0.0
        } else {
            (right - left) * (bottom - top)
        }
    }
}

/// What a drop target stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TargetId {
    Column(Column),
    Task(TaskId),
}

impl TargetId {
    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

/// A registered drop target and where it is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTarget {
    pub id: TargetId,
    pub rect: Rect,
}

impl DropTarget {
    pub fn column(column: Column, rect: Rect) -> Self {
        Self {
            id: TargetId::Column(column),
            rect,
        }
    }

    pub fn task(id: impl Into<TaskId>, rect: Rect) -> Self {
        Self {
            id: TargetId::Task(id.into()),
            rect,
        }
    }
}

/// Picks the drop target under the dragged rectangle.
///
/// Column targets win over task targets whenever at least one of them
/// intersects. Within a pass the target with the highest overlap ratio wins,
/// earlier registrations breaking ties. A zero-sized `active` rectangle is
/// treated as a pointer and matches any target containing it.
pub fn resolve_collision<'a>(active: &Rect, targets: &'a [DropTarget]) -> Option<&'a TargetId> {
    best_match(active, targets.iter().filter(|t| t.id.is_column()))
        .or_else(|| best_match(active, targets.iter().filter(|t| !t.id.is_column())))
}

fn best_match<'a>(
    active: &Rect,
    candidates: impl Iterator<Item = &'a DropTarget>,
) -> Option<&'a TargetId> {
    let mut best: Option<(&TargetId, f64)> = None;

    for target in candidates {
        let score = overlap_score(active, &target.rect);
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((&target.id, score));
        }
    }

    best.map(|(id, _)| id)
}

fn overlap_score(active: &Rect, target: &Rect) -> f64 {
    if active.area() == 0.0 {
        return if target.contains(Point::new(active.x, active.y)) {
            1.0
        } else {
            0.0
        };
    }

    let overlap = active.intersection_area(target);
    let union = active.area() + target.area() - overlap;
    if union <= 0.0 {
        0.0
    } else {
        overlap / union
    }
}
