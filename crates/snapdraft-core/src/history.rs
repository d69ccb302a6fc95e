//! Linear undo/redo ledger of shape-list snapshots.

use crate::shapes::Shape;
use serde::Serialize;
use std::sync::Arc;

/// The edit that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Initial,
    AddShape,
    MoveShape,
    DeleteShape,
}

/// An immutable view of the shape list after one edit.
///
/// Shapes are shared between snapshots; an edit replaces the handles it
/// touches and copies the rest.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub last_operation: Operation,
    pub shapes: Vec<Arc<Shape>>,
}

/// Snapshots plus a cursor to the current one.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    current_version: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// A ledger holding only the empty-canvas snapshot.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Snapshot {
                last_operation: Operation::Initial,
                shapes: Vec::new(),
            }],
            current_version: 0,
        }
    }

    /// Append a snapshot after the current one, discarding any redo tail.
    pub fn record_snapshot(&mut self, shapes: Vec<Arc<Shape>>, operation: Operation) {
        self.snapshots.truncate(self.current_version + 1);
        self.snapshots.push(Snapshot {
            last_operation: operation,
            shapes,
        });
        self.current_version += 1;
        log::debug!(
            "Recorded {operation:?} as version {} ({} shapes)",
            self.current_version,
            self.shapes().len()
        );
    }

    /// Step back one snapshot. Returns false at the initial snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            log::info!("Nothing to undo");
            return false;
        }
        self.current_version -= 1;
        true
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            log::info!("Nothing to redo");
            return false;
        }
        self.current_version += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.current_version >= 1
    }

    pub fn can_redo(&self) -> bool {
        self.current_version + 1 < self.snapshots.len()
    }

    pub fn current_version(&self) -> usize {
        self.current_version
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.current_version]
    }

    /// The shape list of the current snapshot.
    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.current().shapes
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}
