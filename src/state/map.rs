use crate::infra::{Bounds, Direction, Position, Side};

/// Maze side length used by the mission unless configured otherwise.
pub const MAZE_SIZE: i32 = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Indexed by `Direction::index()`.
    pub walls: [bool; 4],
    pub visited: bool,
}

/// Everything the agent has learned about the maze so far.
///
/// Walls and visited flags only ever go from `false` to `true`. A wall
/// recorded on one side of a cell is mirrored onto the neighbor facing it,
/// unless that neighbor lies outside the grid.
#[derive(Debug, Clone)]
pub struct KnowledgeMap {
    size: i32,
    cells: Vec<Cell>,
}

impl KnowledgeMap {
    pub fn new(size: i32) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![Cell::default(); (size * size) as usize],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.size)
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.bounds().contains(pos)
    }

    fn index(&self, pos: &Position) -> Option<usize> {
        self.contains(pos).then(|| (pos.y * self.size + pos.x) as usize)
    }

    pub fn cell(&self, pos: &Position) -> Option<&Cell> {
        self.index(pos).map(|index| &self.cells[index])
    }

    pub fn has_wall(&self, pos: &Position, direction: Direction) -> bool {
        self.cell(pos).is_some_and(|cell| cell.walls[direction.index()])
    }

    pub fn is_visited(&self, pos: &Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell.visited)
    }

    pub fn mark_visited(&mut self, pos: &Position) {
        if let Some(index) = self.index(pos) {
            self.cells[index].visited = true;
        }
    }

    /// Records a wall on `pos`'s `direction` side and mirrors it onto the
    /// neighbor when that neighbor is inside the grid.
    pub fn record_wall(&mut self, pos: &Position, direction: Direction) {
        let Some(index) = self.index(pos) else {
            return;
        };
        self.cells[index].walls[direction.index()] = true;

        let neighbor = pos.step(direction);
        if let Some(neighbor_index) = self.index(&neighbor) {
            self.cells[neighbor_index].walls[direction.opposite().index()] = true;
        }
    }

    /// Fuses one sensor reading taken at `pos` while facing `heading`.
    pub fn observe(
        &mut self,
        pos: Position,
        heading: Direction,
        front_blocked: bool,
        left_blocked: bool,
        right_blocked: bool,
    ) {
        self.mark_visited(&pos);

        for (side, blocked) in [
            (Side::Front, front_blocked),
            (Side::Right, right_blocked),
            (Side::Left, left_blocked),
        ] {
            if blocked {
                self.record_wall(&pos, heading.resolve(side));
            }
        }
    }

    /// True when the step from `pos` towards `direction` stays on the grid
    /// and no wall has been recorded on that side.
    pub fn is_open(&self, pos: &Position, direction: Direction) -> bool {
        self.contains(&pos.step(direction)) && !self.has_wall(pos, direction)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Position::new(x, y)))
    }

    pub fn unvisited_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|pos| !self.is_visited(pos))
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visited).count()
    }

    /// Renders the known walls, highest y first. `markers` overrides the
    /// glyph drawn in a cell; the agent is drawn as `@`.
    pub fn draw_ascii_map(&self, agent: Position, markers: &[(Position, char)]) -> String {
        let mut output = String::new();

        for y in (0..self.size).rev() {
            for x in 0..self.size {
                output.push('+');
                let north = self.has_wall(&Position::new(x, y), Direction::North);
                output.push_str(if north { "---" } else { "   " });
            }
            output.push_str("+\n");

            for x in 0..self.size {
                let pos = Position::new(x, y);
                let west = self.has_wall(&pos, Direction::West);
                output.push(if west { '|' } else { ' ' });

                let glyph = if pos == agent {
                    '@'
                } else if let Some((_, marker)) = markers.iter().find(|(p, _)| *p == pos) {
                    *marker
                } else if self.is_visited(&pos) {
                    ' '
                } else {
                    '.'
                };
                output.push(' ');
                output.push(glyph);
                output.push(' ');
            }
            let east = self.has_wall(&Position::new(self.size - 1, y), Direction::East);
            output.push(if east { '|' } else { ' ' });
            output.push('\n');
        }

        for x in 0..self.size {
            output.push('+');
            let south = self.has_wall(&Position::new(x, 0), Direction::South);
            output.push_str(if south { "---" } else { "   " });
        }
        output.push('+');
        output
    }
}

impl Default for KnowledgeMap {
    fn default() -> Self {
        Self::new(MAZE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_walls_mirrored(map: &KnowledgeMap) {
        for pos in map.positions() {
            for direction in Direction::ALL {
                let neighbor = pos.step(direction);
                if map.has_wall(&pos, direction) && map.contains(&neighbor) {
                    assert!(
                        map.has_wall(&neighbor, direction.opposite()),
                        "wall {:?} of {} not mirrored on {}",
                        direction,
                        pos,
                        neighbor
                    );
                }
            }
        }
    }

    #[test]
    fn test_observe_marks_visited_and_mirrors_walls() {
        let mut map = KnowledgeMap::new(16);
        map.observe(Position::new(5, 5), Direction::North, true, true, false);

        assert!(map.is_visited(&Position::new(5, 5)));
        assert!(map.has_wall(&Position::new(5, 5), Direction::North));
        assert!(map.has_wall(&Position::new(5, 6), Direction::South));
        assert!(map.has_wall(&Position::new(5, 5), Direction::West));
        assert!(map.has_wall(&Position::new(4, 5), Direction::East));
        assert!(!map.has_wall(&Position::new(5, 5), Direction::East));
        assert_walls_mirrored(&map);
    }

    #[test]
    fn test_sides_follow_heading() {
        let mut map = KnowledgeMap::new(16);
        // Facing East: front is East, left is North, right is South.
        map.observe(Position::new(3, 3), Direction::East, false, true, false);
        assert!(map.has_wall(&Position::new(3, 3), Direction::North));

        map.observe(Position::new(8, 8), Direction::West, false, false, true);
        assert!(map.has_wall(&Position::new(8, 8), Direction::North));
        assert!(map.has_wall(&Position::new(8, 9), Direction::South));
    }

    #[test]
    fn test_boundary_walls_do_not_write_outside() {
        let mut map = KnowledgeMap::new(16);
        map.observe(Position::new(15, 15), Direction::East, true, true, false);
        map.observe(Position::new(0, 0), Direction::South, true, false, true);

        assert!(map.has_wall(&Position::new(15, 15), Direction::East));
        assert!(map.has_wall(&Position::new(15, 15), Direction::North));
        assert!(map.has_wall(&Position::new(0, 0), Direction::South));
        assert!(map.has_wall(&Position::new(0, 0), Direction::West));
        assert!(!map.has_wall(&Position::new(16, 15), Direction::West));
        assert!(map.cell(&Position::new(16, 15)).is_none());
        assert_eq!(map.visited_count(), 2);
        assert_walls_mirrored(&map);
    }

    #[test]
    fn test_observe_is_monotonic() {
        let mut map = KnowledgeMap::new(16);
        let pos = Position::new(2, 7);
        map.observe(pos, Direction::North, true, true, true);
        let snapshot = map.clone();

        map.observe(pos, Direction::North, true, true, true);
        assert_eq!(snapshot.cells, map.cells);

        // A later reading without walls never clears what is known.
        map.observe(pos, Direction::North, false, false, false);
        assert_eq!(snapshot.cells, map.cells);
        assert!(map.is_visited(&pos));
    }

    #[test]
    fn test_is_open_honors_walls_and_edges() {
        let mut map = KnowledgeMap::new(4);
        let corner = Position::new(0, 0);
        assert!(!map.is_open(&corner, Direction::South));
        assert!(!map.is_open(&corner, Direction::West));
        assert!(map.is_open(&corner, Direction::North));

        map.record_wall(&corner, Direction::North);
        assert!(!map.is_open(&corner, Direction::North));
        assert!(!map.is_open(&Position::new(0, 1), Direction::South));
    }

    #[test]
    fn test_unvisited_cells_shrink() {
        let mut map = KnowledgeMap::new(3);
        assert_eq!(map.unvisited_cells().count(), 9);
        map.mark_visited(&Position::new(1, 1));
        map.mark_visited(&Position::new(1, 1));
        assert_eq!(map.unvisited_cells().count(), 8);
        assert_eq!(map.visited_count(), 1);
    }

    #[test]
    fn test_draw_ascii_map() {
        let mut map = KnowledgeMap::new(2);
        map.observe(Position::new(0, 0), Direction::North, false, true, true);

        let drawn = map.draw_ascii_map(Position::new(0, 0), &[(Position::new(1, 1), 'F')]);
        let expected = concat!(
            "+   +   +\n",
            "  .   F  \n",
            "+   +   +\n",
            "| @ | .  \n",
            "+   +   +",
        );
        assert_eq!(drawn, expected);
    }
}
