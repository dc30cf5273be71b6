pub mod config;
pub mod infra;
pub mod mission;
pub mod planners;
pub mod state;

// Re-export commonly used types for convenience
pub use config::MissionConfig;
pub use infra::{Direction, Maze, MissionObserver, Position, Robot, SimulatedRobot};
pub use mission::{Mission, MissionError, MissionPhase, MissionReport};
pub use state::KnowledgeMap;
