use crate::infra::{Color, Position};

/// Sensing and actuation interface of the physical or simulated mouse.
///
/// Calls are treated as infallible; fault handling belongs to the
/// implementation.
pub trait Robot {
    /// Wall directly ahead of the current heading
    fn wall_front(&self) -> bool;

    fn wall_left(&self) -> bool;

    fn wall_right(&self) -> bool;

    /// Pivot 90 degrees counter-clockwise without moving
    fn turn_left(&mut self);

    /// Pivot 90 degrees clockwise without moving
    fn turn_right(&mut self);

    /// Drive one cell forward along the current heading
    fn move_forward(&mut self);

    /// Cosmetic cell highlight, no effect on navigation
    fn set_color(&mut self, pos: Position, color: Color);

    /// Cosmetic cell label, no effect on navigation
    fn set_text(&mut self, pos: Position, text: &str);
}
