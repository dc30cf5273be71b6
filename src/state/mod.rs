mod agent_state;
mod map;

pub use agent_state::{AgentState, Flag, FlagSet};
pub use map::{Cell, KnowledgeMap, MAZE_SIZE};
