mod composite_observer;
mod default_observer;
mod maze;
mod mission_log;
mod mission_observer;
mod robot;
mod simulator;
mod types;

pub use composite_observer::CompositeObserver;
pub use default_observer::DefaultObserver;
pub use maze::{Maze, MazeParseError};
pub use mission_log::MissionLogObserver;
pub use mission_observer::MissionObserver;
pub use robot::Robot;
pub use simulator::{Annotation, SimulatedRobot};
pub use types::{Bounds, Color, Direction, Position, Side};
