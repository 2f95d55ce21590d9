use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub position: Point,
}

impl TouchEvent {
    pub fn new(action: TouchAction, position: Point) -> Self {
        Self { action, position }
    }
}
