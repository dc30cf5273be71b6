use std::error::Error;
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::infra::{Bounds, Direction, Position};

#[derive(Debug, PartialEq, Eq)]
pub enum MazeParseError {
    TooShort { lines: usize },
    NotSquare { rows: i32, columns: i32 },
}

impl fmt::Display for MazeParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeParseError::TooShort { lines } => {
                write!(formatter, "Maze text has {} lines, expected at least 3", lines)
            }
            MazeParseError::NotSquare { rows, columns } => {
                write!(formatter, "Maze is {} rows by {} columns, expected a square", rows, columns)
            }
        }
    }
}

impl Error for MazeParseError {}

/// Ground-truth wall layout of a square maze. The outer boundary is always
/// walled and inner walls are stored on both cells they separate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: i32,
    walls: Vec<[bool; 4]>,
}

impl Maze {
    /// A maze with only its boundary walls.
    pub fn open(size: i32) -> Self {
        let size = size.max(1);
        let mut maze = Self {
            size,
            walls: vec![[false; 4]; (size * size) as usize],
        };
        for i in 0..size {
            maze.add_wall(&Position::new(i, 0), Direction::South);
            maze.add_wall(&Position::new(i, size - 1), Direction::North);
            maze.add_wall(&Position::new(0, i), Direction::West);
            maze.add_wall(&Position::new(size - 1, i), Direction::East);
        }
        maze
    }

    /// A perfect maze carved by a seeded recursive backtracker; every cell is
    /// reachable from every other cell.
    pub fn generate(size: i32, seed: u64) -> Self {
        let size = size.max(1);
        let mut maze = Self {
            size,
            walls: vec![[true; 4]; (size * size) as usize],
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut carved = vec![false; (size * size) as usize];

        let start = Position::new(0, 0);
        carved[0] = true;
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates: Vec<(Direction, Position)> = current
                .neighbors()
                .into_iter()
                .filter(|(_, next)| {
                    maze.index(next).is_some_and(|index| !carved[index])
                })
                .collect();

            match candidates.choose(&mut rng) {
                Some(&(direction, next)) => {
                    maze.remove_wall(&current, direction);
                    if let Some(index) = maze.index(&next) {
                        carved[index] = true;
                    }
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        maze
    }

    /// Parses the classic text layout where `+---+` rows carry horizontal
    /// walls and `|` columns carry vertical walls. The first line is the
    /// northern edge, so it belongs to the highest y.
    pub fn parse(text: &str) -> Result<Self, MazeParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < 3 {
            return Err(MazeParseError::TooShort { lines: lines.len() });
        }

        let rows = ((lines.len() - 1) / 2) as i32;
        let columns = ((lines[0].chars().count().max(1) - 1) / 4) as i32;
        if rows != columns {
            return Err(MazeParseError::NotSquare { rows, columns });
        }

        let size = rows;
        let mut maze = Maze::open(size);
        let char_at = |line: &str, index: i32| line.chars().nth(index as usize).unwrap_or(' ');

        for row in 0..=size {
            let Some(edge) = lines.get((row * 2) as usize) else {
                break;
            };
            for x in 0..size {
                if char_at(edge, x * 4 + 1) != '-' {
                    continue;
                }
                if row < size {
                    maze.add_wall(&Position::new(x, size - 1 - row), Direction::North);
                } else {
                    maze.add_wall(&Position::new(x, 0), Direction::South);
                }
            }

            if row == size {
                break;
            }
            let Some(body) = lines.get((row * 2 + 1) as usize) else {
                break;
            };
            let y = size - 1 - row;
            for x in 0..size {
                if char_at(body, x * 4) == '|' {
                    maze.add_wall(&Position::new(x, y), Direction::West);
                }
            }
            if char_at(body, size * 4) == '|' {
                maze.add_wall(&Position::new(size - 1, y), Direction::East);
            }
        }

        Ok(maze)
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.size)
    }

    fn index(&self, pos: &Position) -> Option<usize> {
        self.bounds()
            .contains(pos)
            .then(|| (pos.y * self.size + pos.x) as usize)
    }

    /// Anything outside the grid counts as walled.
    pub fn has_wall(&self, pos: &Position, direction: Direction) -> bool {
        self.index(pos)
            .is_none_or(|index| self.walls[index][direction.index()])
    }

    pub fn add_wall(&mut self, pos: &Position, direction: Direction) {
        self.set_wall(pos, direction, true);
    }

    /// Boundary walls stay in place.
    pub fn remove_wall(&mut self, pos: &Position, direction: Direction) {
        if !self.bounds().contains(&pos.step(direction)) {
            return;
        }
        self.set_wall(pos, direction, false);
    }

    fn set_wall(&mut self, pos: &Position, direction: Direction, present: bool) {
        if let Some(index) = self.index(pos) {
            self.walls[index][direction.index()] = present;
        }
        let neighbor = pos.step(direction);
        if let Some(index) = self.index(&neighbor) {
            self.walls[index][direction.opposite().index()] = present;
        }
    }
}
