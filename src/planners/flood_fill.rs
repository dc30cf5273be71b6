//! Multi-source breadth-first cost propagation over the knowledge map.
//!
//! Two cells are connected when they are adjacent, both inside the grid and
//! no wall has been recorded between them. Walls that were never sensed are
//! treated as open, so the field is optimistic about unexplored territory.

use std::collections::VecDeque;

use crate::infra::Position;
use crate::state::KnowledgeMap;

/// Cost of a cell with no known path to any seed.
pub const UNREACHABLE: u16 = u16::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodGoal {
    /// Seed every unvisited cell.
    Frontier,
    /// Seed a single fixed cell.
    Destination(Position),
}

/// Hop counts to the nearest seed, one per cell, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostField {
    size: i32,
    costs: Vec<u16>,
}

impl CostField {
    fn new(size: i32) -> Self {
        Self {
            size,
            costs: vec![UNREACHABLE; (size * size) as usize],
        }
    }

    fn index(&self, pos: &Position) -> Option<usize> {
        (pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size)
            .then(|| (pos.y * self.size + pos.x) as usize)
    }

    /// Cost at `pos`; cells outside the grid report `UNREACHABLE`.
    pub fn get(&self, pos: &Position) -> u16 {
        self.index(pos)
            .map_or(UNREACHABLE, |index| self.costs[index])
    }

    pub fn is_reachable(&self, pos: &Position) -> bool {
        self.get(pos) != UNREACHABLE
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn costs(&self) -> &[u16] {
        &self.costs
    }
}

pub struct FloodFill;

impl FloodFill {
    #[tracing::instrument(level = "trace", skip(map))]
    pub fn compute(map: &KnowledgeMap, goal: FloodGoal) -> CostField {
        let mut field = CostField::new(map.size());
        let mut queue = VecDeque::new();

        match goal {
            FloodGoal::Frontier => {
                for pos in map.unvisited_cells() {
                    if let Some(index) = field.index(&pos) {
                        field.costs[index] = 0;
                        queue.push_back(pos);
                    }
                }
            }
            FloodGoal::Destination(target) => {
                if let Some(index) = field.index(&target) {
                    field.costs[index] = 0;
                    queue.push_back(target);
                }
            }
        }

        let seeds = queue.len();

        while let Some(current) = queue.pop_front() {
            let next_cost = field.get(&current) + 1;

            for (direction, neighbor) in current.neighbors() {
                if !map.is_open(&current, direction) {
                    continue;
                }

                let Some(neighbor_index) = field.index(&neighbor) else {
                    continue;
                };

                if next_cost < field.costs[neighbor_index] {
                    field.costs[neighbor_index] = next_cost;
                    queue.push_back(neighbor);
                }
            }
        }

        tracing::trace!(seeds, "Flood fill complete");
        field
    }
}
