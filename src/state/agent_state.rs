use crate::infra::{Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentState {
    pub position: Position,
    pub heading: Direction,
}

impl AgentState {
    pub fn new(position: Position, heading: Direction) -> Self {
        Self { position, heading }
    }

    /// Faces `heading` and advances one cell.
    pub fn advance(&mut self, heading: Direction) {
        self.heading = heading;
        self.position = self.position.step(heading);
    }
}

impl Default for AgentState {
    fn default() -> Self {
        Self::new(Position::new(0, 0), Direction::North)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub position: Position,
    pub discovered: bool,
}

impl Flag {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            discovered: false,
        }
    }
}

/// The cells that must be visited before the final destination is known.
/// Membership never changes; discovery only goes from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new(positions: &[Position]) -> Self {
        Self {
            flags: positions.iter().copied().map(Flag::new).collect(),
        }
    }

    /// Marks every undiscovered flag at `pos` as discovered and returns the
    /// positions that were newly discovered.
    pub fn discover_at(&mut self, pos: Position) -> Vec<Position> {
        let mut found = Vec::new();
        for flag in self.flags.iter_mut().filter(|flag| !flag.discovered) {
            if flag.position == pos {
                flag.discovered = true;
                found.push(flag.position);
            }
        }
        found
    }

    pub fn all_discovered(&self) -> bool {
        self.flags.iter().all(|flag| flag.discovered)
    }

    pub fn discovered_count(&self) -> usize {
        self.flags.iter().filter(|flag| flag.discovered).count()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.flags.iter().map(|flag| flag.position).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_updates_heading_and_position() {
        let mut agent = AgentState::default();
        agent.advance(Direction::East);
        assert_eq!(agent.position, Position::new(1, 0));
        assert_eq!(agent.heading, Direction::East);
        agent.advance(Direction::North);
        assert_eq!(agent.position, Position::new(1, 1));
    }

    #[test]
    fn test_flags_discovered_in_any_order() {
        let mut flags = FlagSet::new(&[
            Position::new(7, 7),
            Position::new(0, 7),
            Position::new(9, 15),
        ]);
        assert!(!flags.all_discovered());

        assert_eq!(flags.discover_at(Position::new(9, 15)), vec![Position::new(9, 15)]);
        assert!(flags.discover_at(Position::new(1, 1)).is_empty());
        assert_eq!(flags.discover_at(Position::new(0, 7)), vec![Position::new(0, 7)]);
        assert!(!flags.all_discovered());
        assert_eq!(flags.discovered_count(), 2);

        flags.discover_at(Position::new(7, 7));
        assert!(flags.all_discovered());
    }

    #[test]
    fn test_rediscovery_reports_nothing() {
        let mut flags = FlagSet::new(&[Position::new(2, 2)]);
        assert_eq!(flags.discover_at(Position::new(2, 2)).len(), 1);
        assert!(flags.discover_at(Position::new(2, 2)).is_empty());
        assert!(flags.iter().all(|flag| flag.discovered));
    }
}
