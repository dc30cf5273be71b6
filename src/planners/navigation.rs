use crate::infra::{Direction, Position};
use crate::planners::flood_fill::{CostField, UNREACHABLE};
use crate::state::KnowledgeMap;

/// How the agent has to rotate before driving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Straight,
    Right,
    Left,
    /// Always executed as two right turns.
    TurnAround,
}

impl Rotation {
    pub fn between(heading: Direction, target: Direction) -> Self {
        if target == heading {
            Rotation::Straight
        } else if target == heading.turn_right() {
            Rotation::Right
        } else if target == heading.turn_left() {
            Rotation::Left
        } else {
            Rotation::TurnAround
        }
    }

    /// Number of 90 degree pivots this rotation takes.
    pub fn turn_count(self) -> u32 {
        match self {
            Rotation::Straight => 0,
            Rotation::Right | Rotation::Left => 1,
            Rotation::TurnAround => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub direction: Direction,
    pub rotation: Rotation,
    pub destination: Position,
    pub cost: u16,
}

pub struct Navigator;

impl Navigator {
    /// Picks the open neighbor with the lowest cost.
    ///
    /// Directions are scanned North, East, South, West and only a strictly
    /// lower cost replaces the current best, so ties go to the earliest
    /// direction. Neighbors without a known path are never chosen. Returns
    /// `None` when no direction qualifies.
    pub fn plan(
        map: &KnowledgeMap,
        costs: &CostField,
        position: Position,
        heading: Direction,
    ) -> Option<PlannedMove> {
        let mut best: Option<(Direction, Position, u16)> = None;
        let mut min_cost = UNREACHABLE;

        for (direction, neighbor) in position.neighbors() {
            if !map.is_open(&position, direction) {
                continue;
            }

            let cost = costs.get(&neighbor);
            if cost < min_cost {
                min_cost = cost;
                best = Some((direction, neighbor, cost));
            }
        }

        best.map(|(direction, destination, cost)| PlannedMove {
            direction,
            rotation: Rotation::between(heading, direction),
            destination,
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planners::flood_fill::{FloodFill, FloodGoal};

    #[test]
    fn test_rotation_between_headings() {
        assert_eq!(Rotation::between(Direction::North, Direction::North), Rotation::Straight);
        assert_eq!(Rotation::between(Direction::North, Direction::East), Rotation::Right);
        assert_eq!(Rotation::between(Direction::North, Direction::West), Rotation::Left);
        assert_eq!(Rotation::between(Direction::North, Direction::South), Rotation::TurnAround);
        assert_eq!(Rotation::between(Direction::West, Direction::North), Rotation::Right);
        assert_eq!(Rotation::between(Direction::East, Direction::West), Rotation::TurnAround);
        assert_eq!(Rotation::TurnAround.turn_count(), 2);
    }

    #[test]
    fn test_moves_downhill() {
        let map = KnowledgeMap::new(16);
        let field = FloodFill::compute(&map, FloodGoal::Destination(Position::new(5, 0)));

        let planned = Navigator::plan(&map, &field, Position::new(2, 0), Direction::North).unwrap();
        assert_eq!(planned.direction, Direction::East);
        assert_eq!(planned.rotation, Rotation::Right);
        assert_eq!(planned.destination, Position::new(3, 0));
        assert_eq!(planned.cost, 2);
    }

    #[test]
    fn test_ties_keep_first_direction() {
        let map = KnowledgeMap::new(16);
        // North and East neighbors are both one hop closer.
        let field = FloodFill::compute(&map, FloodGoal::Destination(Position::new(8, 8)));

        let planned = Navigator::plan(&map, &field, Position::new(4, 4), Direction::South).unwrap();
        assert_eq!(planned.direction, Direction::North);
        assert_eq!(planned.rotation, Rotation::TurnAround);
    }

    #[test]
    fn test_walls_and_edges_are_skipped() {
        let mut map = KnowledgeMap::new(16);
        map.record_wall(&Position::new(0, 0), Direction::North);
        let field = FloodFill::compute(&map, FloodGoal::Destination(Position::new(0, 5)));

        let planned = Navigator::plan(&map, &field, Position::new(0, 0), Direction::North).unwrap();
        assert_eq!(planned.direction, Direction::East);
    }

    #[test]
    fn test_enclosed_cell_has_no_move() {
        let mut map = KnowledgeMap::new(4);
        let pos = Position::new(1, 1);
        for direction in Direction::ALL {
            map.record_wall(&pos, direction);
        }
        let field = FloodFill::compute(&map, FloodGoal::Destination(Position::new(3, 3)));

        assert!(Navigator::plan(&map, &field, pos, Direction::North).is_none());
    }

    #[test]
    fn test_unreachable_neighbors_are_not_chosen() {
        let map = KnowledgeMap::new(4);
        let field = FloodFill::compute(&map, FloodGoal::Destination(Position::new(9, 9)));

        assert!(Navigator::plan(&map, &field, Position::new(0, 0), Direction::North).is_none());
    }
}
