use std::collections::HashMap;

use tracing::warn;

use crate::infra::{Color, Direction, Maze, Position, Robot, Side};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub color: Option<Color>,
    pub text: Option<String>,
}

/// A mouse driving through a known `Maze`, used by the binary and in tests.
pub struct SimulatedRobot {
    maze: Maze,
    position: Position,
    heading: Direction,
    trail: Vec<Position>,
    annotations: HashMap<Position, Annotation>,
    moves: u32,
    turns: u32,
    collisions: u32,
}

impl SimulatedRobot {
    pub fn new(maze: Maze) -> Self {
        Self::with_start(maze, Position::new(0, 0), Direction::North)
    }

    pub fn with_start(maze: Maze, position: Position, heading: Direction) -> Self {
        Self {
            maze,
            position,
            heading,
            trail: vec![position],
            annotations: HashMap::new(),
            moves: 0,
            turns: 0,
            collisions: 0,
        }
    }

    fn wall_on(&self, side: Side) -> bool {
        self.maze.has_wall(&self.position, self.heading.resolve(side))
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Every cell occupied so far, starting with the start cell.
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    pub fn annotation(&self, pos: &Position) -> Option<&Annotation> {
        self.annotations.get(pos)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Forward moves refused because a wall was in the way.
    pub fn collisions(&self) -> u32 {
        self.collisions
    }
}

impl Robot for SimulatedRobot {
    fn wall_front(&self) -> bool {
        self.wall_on(Side::Front)
    }

    fn wall_left(&self) -> bool {
        self.wall_on(Side::Left)
    }

    fn wall_right(&self) -> bool {
        self.wall_on(Side::Right)
    }

    fn turn_left(&mut self) {
        self.heading = self.heading.turn_left();
        self.turns += 1;
    }

    fn turn_right(&mut self) {
        self.heading = self.heading.turn_right();
        self.turns += 1;
    }

    fn move_forward(&mut self) {
        if self.wall_front() {
            warn!(
                "Refusing to drive through wall at {} facing {:?}",
                self.position, self.heading
            );
            self.collisions += 1;
            return;
        }
        self.position = self.position.step(self.heading);
        self.trail.push(self.position);
        self.moves += 1;
    }

    fn set_color(&mut self, pos: Position, color: Color) {
        self.annotations.entry(pos).or_default().color = Some(color);
    }

    fn set_text(&mut self, pos: Position, text: &str) {
        self.annotations.entry(pos).or_default().text = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_senses_relative_to_heading() {
        let mut maze = Maze::open(4);
        maze.add_wall(&Position::new(1, 1), Direction::North);
        let mut robot = SimulatedRobot::with_start(maze, Position::new(1, 1), Direction::North);

        assert!(robot.wall_front());
        assert!(!robot.wall_left());
        assert!(!robot.wall_right());

        robot.turn_right();
        assert_eq!(robot.heading(), Direction::East);
        assert!(robot.wall_left());
        assert!(!robot.wall_front());
    }

    #[test]
    fn test_move_forward_follows_heading() {
        let mut robot = SimulatedRobot::new(Maze::open(4));
        robot.move_forward();
        robot.turn_right();
        robot.move_forward();

        assert_eq!(robot.position(), Position::new(1, 1));
        assert_eq!(robot.trail(), &[Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]);
        assert_eq!(robot.moves(), 2);
        assert_eq!(robot.turns(), 1);
    }

    #[test]
    fn test_walls_stop_the_robot() {
        let mut robot = SimulatedRobot::new(Maze::open(4));
        robot.turn_left();
        robot.move_forward();

        assert_eq!(robot.position(), Position::new(0, 0));
        assert_eq!(robot.collisions(), 1);
        assert_eq!(robot.moves(), 0);
    }

    #[test]
    fn test_annotations_accumulate() {
        let mut robot = SimulatedRobot::new(Maze::open(4));
        let cell = Position::new(2, 3);
        robot.set_color(cell, Color::Green);
        robot.set_text(cell, "START");
        robot.set_color(cell, Color::Blue);

        let annotation = robot.annotation(&cell).unwrap();
        assert_eq!(annotation.color, Some(Color::Blue));
        assert_eq!(annotation.text.as_deref(), Some("START"));
        assert!(robot.annotation(&Position::new(0, 0)).is_none());
    }
}
