use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub const DEFAULT_SELECT_RADIUS: f64 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn distance(&self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Identifies a control point for as long as it lives. Ids are handed out in
/// increasing order and never reused by the store that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlPoint {
    pub id: PointId,
    pub position: Position,
    pub select_radius: f64,
    pub selected: bool,
}

impl ControlPoint {
    pub fn hit(&self, probe: Position) -> bool {
        self.position.distance(probe) <= self.select_radius
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no control point with id {0}")]
    NotFound(PointId),
}

/// Owns the live control points, keyed by id. Iteration is in ascending id
/// order, i.e. creation order, which is also the order the curve uses.
#[derive(Debug)]
pub struct PointStore {
    points: BTreeMap<PointId, ControlPoint>,
    next_id: u64,
    select_radius: f64,
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PointStore {
    pub fn new() -> Self {
        Self::with_select_radius(DEFAULT_SELECT_RADIUS)
    }
    pub fn with_select_radius(select_radius: f64) -> Self {
        Self { points: BTreeMap::new(), next_id: 0, select_radius }
    }

    /// Radius given to points created from now on.
    pub fn set_select_radius(&mut self, select_radius: f64) {
        self.select_radius = select_radius;
    }

    pub fn add(&mut self, position: Position) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        // created under the cursor, so it starts out highlighted
        let point = ControlPoint { id, position, select_radius: self.select_radius, selected: true };
        self.points.insert(id, point);
        id
    }

    pub fn remove(&mut self, id: PointId) -> Option<ControlPoint> {
        self.points.remove(&id)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn get(&self, id: PointId) -> Result<&ControlPoint, StoreError> {
        self.points.get(&id).ok_or(StoreError::NotFound(id))
    }

    /// Moves a point and returns where it was before.
    pub fn move_to(&mut self, id: PointId, position: Position) -> Result<Position, StoreError> {
        let point = self.points.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        Ok(std::mem::replace(&mut point.position, position))
    }

    /// Overlapping points resolve to the most recently created one.
    pub fn hit_test(&self, probe: Position) -> Option<PointId> {
        self.points.values().rev().find(|point| point.hit(probe)).map(|point| point.id)
    }

    pub fn update_selection(&mut self, cursor: Position) {
        for point in self.points.values_mut() {
            point.selected = point.hit(cursor);
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ControlPoint> + '_ {
        self.points.values()
    }

    /// Snapshot of the positions in curve order.
    pub fn positions(&self) -> Vec<Position> {
        self.points.values().map(|point| point.position).collect()
    }
}
