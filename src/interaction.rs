use crate::points::{PointId, PointStore, Position};

pub const DEFAULT_DELETE_THRESHOLD: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Press { button: Button, position: Position },
    Release { button: Button, position: Position },
    Move(Position),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging(PointId),
}

#[derive(Debug, Default)]
pub struct DragState {
    pub active: Option<PointId>,
    pub distance_traveled: f64,
}

impl DragState {
    fn begin(&mut self, id: PointId) {
        self.active = Some(id);
        self.distance_traveled = 0.0;
    }
    fn reset(&mut self) {
        self.active = None;
        self.distance_traveled = 0.0;
    }
}

/// The whole mutable state of the editor: the points, the drag in progress and
/// the last known cursor. Owned by the app and handed to input and render code.
#[derive(Debug)]
pub struct World {
    pub points: PointStore,
    drag: DragState,
    cursor: Option<Position>,
    delete_threshold: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(PointStore::new(), DEFAULT_DELETE_THRESHOLD)
    }
}

impl World {
    pub fn new(points: PointStore, delete_threshold: f64) -> Self {
        Self { points, drag: DragState::default(), cursor: None, delete_threshold }
    }

    pub fn set_delete_threshold(&mut self, delete_threshold: f64) {
        self.delete_threshold = delete_threshold;
    }

    pub fn state(&self) -> InteractionState {
        match self.drag.active {
            Some(id) => InteractionState::Dragging(id),
            None => InteractionState::Idle,
        }
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press { button: Button::Primary, position } => self.press(position),
            InputEvent::Release { button: Button::Primary, .. } => self.release(),
            InputEvent::Move(position) => self.cursor_moved(position),
            _ => {}
        }
    }

    /// Per-frame refresh of the derived selection state.
    pub fn frame(&mut self) {
        if let Some(cursor) = self.cursor {
            self.points.update_selection(cursor);
        }
    }

    /// Removes every point and abandons any drag.
    pub fn clear(&mut self) {
        self.drag.reset();
        self.points.clear();
    }

    fn press(&mut self, position: Position) {
        self.cursor = Some(position);
        if self.drag.active.is_some() {
            // release got lost, finish the old drag first
            self.release();
        }
        // creating and grabbing are exclusive, a new point is never a delete target
        match self.points.hit_test(position) {
            Some(id) => {
                log::debug!("drag started on {id}");
                self.drag.begin(id);
            }
            None => {
                let id = self.points.add(position);
                log::debug!("created point {id} at ({:.1}, {:.1})", position.x, position.y);
            }
        }
    }

    fn release(&mut self) {
        let Some(id) = self.drag.active else {
            return;
        };
        if self.drag.distance_traveled < self.delete_threshold {
            match self.points.remove(id) {
                Some(_) => log::debug!("deleted point {id} by click"),
                None => log::error!("clicked point {id} vanished before release"),
            }
        } else {
            log::debug!("drag of {id} finished after {:.1}px", self.drag.distance_traveled);
        }
        self.drag.reset();
    }

    fn cursor_moved(&mut self, position: Position) {
        self.cursor = Some(position);
        if let Some(id) = self.drag.active {
            match self.points.move_to(id, position) {
                Ok(previous) => self.drag.distance_traveled += previous.distance(position),
                Err(err) => {
                    log::error!("dragged point vanished: {err}");
                    self.drag.reset();
                }
            }
        }
        self.points.update_selection(position);
    }
}
