//! Snapping of the pointer to grid intersections and shapes.
//!
//! Candidates live in three layers:
//!
//! 1. Grid intersections, indexed once per canvas size.
//! 2. Constraint points of finished shapes (endpoints, centers, corners),
//!    re-indexed whenever the shape list changes.
//! 3. Nearest points on shape outlines, computed per query.
//!
//! Layers 1 and 2 map every integer pixel cell within `cell_radius` of a
//! snap point to that point. A query looks up the pointer's cell, takes the
//! highest-priority candidate and reports every reason for snapping to that
//! exact coordinate.

use crate::config::{CanvasConfig, SnapConfig};
use crate::shapes::{ConstraintPointKind, OnShapeKind, Shape, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub const CONSTRAINT_PRIORITY: u8 = 4;
pub const GRID_PRIORITY: u8 = 3;
pub const ON_SHAPE_PRIORITY: u8 = 1;

/// Which layers take part in snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// No snapping.
    None,
    /// Snap to grid intersections.
    Grid,
    /// Snap to constraint points and outlines of other shapes.
    Shapes,
    /// Snap to both grid and shapes.
    #[default]
    All,
}

impl SnapMode {
    /// Cycle to the next snap mode.
    pub fn next(self) -> Self {
        match self {
            SnapMode::None => SnapMode::Grid,
            SnapMode::Grid => SnapMode::Shapes,
            SnapMode::Shapes => SnapMode::All,
            SnapMode::All => SnapMode::None,
        }
    }

    /// Check if grid snapping is enabled.
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, SnapMode::Grid | SnapMode::All)
    }

    /// Check if shape snapping is enabled.
    pub fn snaps_to_shapes(self) -> bool {
        matches!(self, SnapMode::Shapes | SnapMode::All)
    }

    /// Check if any snapping is enabled.
    pub fn is_enabled(self) -> bool {
        self != SnapMode::None
    }
}

/// Why the pointer snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapInfo {
    GridIntersection,
    ShapeConstraint {
        shape_id: ShapeId,
        point: ConstraintPointKind,
    },
    OnShape {
        shape_id: ShapeId,
        kind: OnShapeKind,
    },
}

impl SnapInfo {
    /// The shape behind this reason, if any.
    pub fn shape_id(&self) -> Option<ShapeId> {
        match *self {
            SnapInfo::GridIntersection => None,
            SnapInfo::ShapeConstraint { shape_id, .. } | SnapInfo::OnShape { shape_id, .. } => {
                Some(shape_id)
            }
        }
    }
}

/// A coordinate the pointer may be redirected to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub point: Point,
    pub priority: u8,
    pub reason: SnapInfo,
}

/// The resolved snap for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnappingCoordinate {
    pub point: Point,
    /// Every reason for snapping to `point`, in gathering order.
    pub reasons: Vec<SnapInfo>,
}

type CellKey = (i64, i64);

fn cell_key(p: Point) -> CellKey {
    (p.x.round() as i64, p.y.round() as i64)
}

/// Insert `candidate` into every cell of the per-axis window around it.
fn index_candidate(
    index: &mut HashMap<CellKey, Vec<SnapCandidate>>,
    candidate: SnapCandidate,
    radius: i64,
) {
    let Point { x, y } = candidate.point;
    let (x0, x1) = (x.floor() as i64 - radius, x.ceil() as i64 + radius);
    let (y0, y1) = (y.floor() as i64 - radius, y.ceil() as i64 + radius);
    for cx in x0..=x1 {
        for cy in y0..=y1 {
            index.entry((cx, cy)).or_default().push(candidate);
        }
    }
}

/// Cell-indexed snap candidate lookup.
#[derive(Debug, Clone)]
pub struct SnapEngine {
    config: SnapConfig,
    grid: HashMap<CellKey, Vec<SnapCandidate>>,
    constraints: HashMap<CellKey, Vec<SnapCandidate>>,
}

impl SnapEngine {
    /// Build the engine and its grid index.
    pub fn new(config: &CanvasConfig) -> Self {
        let mut grid = HashMap::new();
        if config.grid_spacing > 0.0 {
            let columns = (config.width / config.grid_spacing).floor() as i64;
            let rows = (config.height / config.grid_spacing).floor() as i64;
            for column in 0..=columns {
                for row in 0..=rows {
                    let candidate = SnapCandidate {
                        point: Point::new(
                            column as f64 * config.grid_spacing,
                            row as f64 * config.grid_spacing,
                        ),
                        priority: GRID_PRIORITY,
                        reason: SnapInfo::GridIntersection,
                    };
                    index_candidate(&mut grid, candidate, config.snap.cell_radius);
                }
            }
        }
        log::debug!("Indexed grid: {} cells", grid.len());
        Self {
            config: config.snap,
            grid,
            constraints: HashMap::new(),
        }
    }

    /// Current snap settings.
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Choose which layers take part in snapping.
    pub fn set_mode(&mut self, mode: SnapMode) {
        self.config.mode = mode;
    }

    /// Re-index the constraint points of `shapes`.
    pub fn rebuild_constraint_index(&mut self, shapes: &[Arc<Shape>]) {
        self.constraints.clear();
        for shape in shapes {
            for (point, kind) in shape.constraint_points() {
                let candidate = SnapCandidate {
                    point,
                    priority: CONSTRAINT_PRIORITY,
                    reason: SnapInfo::ShapeConstraint {
                        shape_id: shape.id(),
                        point: kind,
                    },
                };
                index_candidate(&mut self.constraints, candidate, self.config.cell_radius);
            }
        }
        log::debug!(
            "Indexed constraint points of {} shapes into {} cells",
            shapes.len(),
            self.constraints.len()
        );
    }

    /// All candidates for the pointer at `raw`, in gathering order:
    /// constraint points, grid, then on-shape points.
    ///
    /// The shape `excluded` (being dragged) contributes nothing.
    pub fn candidates(
        &self,
        raw: Point,
        shapes: &[Arc<Shape>],
        excluded: Option<ShapeId>,
    ) -> Vec<SnapCandidate> {
        let mode = self.config.mode;
        let key = cell_key(raw);
        let mut candidates = Vec::new();

        if mode.snaps_to_shapes() {
            if let Some(cell) = self.constraints.get(&key) {
                candidates.extend(
                    cell.iter()
                        .filter(|c| excluded.is_none() || c.reason.shape_id() != excluded)
                        .copied(),
                );
            }
        }
        if mode.snaps_to_grid() {
            if let Some(cell) = self.grid.get(&key) {
                candidates.extend(cell.iter().copied());
            }
        }
        if mode.snaps_to_shapes() {
            for shape in shapes {
                if Some(shape.id()) == excluded {
                    continue;
                }
                // Constraint points win over outline points of the same shape.
                let has_constraint = candidates.iter().any(|c| {
                    c.priority == CONSTRAINT_PRIORITY && c.reason.shape_id() == Some(shape.id())
                });
                if has_constraint {
                    continue;
                }
                let Some(nearest) = shape.nearest_point(raw) else {
                    continue;
                };
                if nearest.is_terminal || nearest.distance >= self.config.on_shape_threshold {
                    continue;
                }
                candidates.push(SnapCandidate {
                    point: nearest.point,
                    priority: ON_SHAPE_PRIORITY,
                    reason: SnapInfo::OnShape {
                        shape_id: shape.id(),
                        kind: nearest.kind,
                    },
                });
            }
        }
        candidates
    }

    /// Resolve the snap for the pointer at `raw`, or `None` if nothing is
    /// close enough.
    ///
    /// The first candidate of the highest priority wins. Reasons are
    /// collected from every candidate at exactly the winning coordinate.
    pub fn resolve(
        &self,
        raw: Point,
        shapes: &[Arc<Shape>],
        excluded: Option<ShapeId>,
    ) -> Option<SnappingCoordinate> {
        let candidates = self.candidates(raw, shapes, excluded);
        let winner = candidates
            .iter()
            .fold(None::<&SnapCandidate>, |best, c| match best {
                Some(b) if b.priority >= c.priority => Some(b),
                _ => Some(c),
            })?;

        let mut reasons = Vec::new();
        for candidate in candidates.iter().filter(|c| c.point == winner.point) {
            if !reasons.contains(&candidate.reason) {
                reasons.push(candidate.reason);
            }
        }
        Some(SnappingCoordinate {
            point: winner.point,
            reasons,
        })
    }
}
