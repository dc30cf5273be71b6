use crate::infra::Position;
use crate::mission::{MissionError, MissionReport, StepContext};
use crate::planners::PlannedMove;
use crate::state::{AgentState, FlagSet};

/// Trait for observing mission events during execution
pub trait MissionObserver {
    /// Called once before the first step
    fn on_mission_start(&mut self, agent: &AgentState, flags: &FlagSet, maze_size: i32);

    /// Called every step, after sensing and cost propagation
    fn on_step(&mut self, context: &StepContext);

    /// Called when the agent stands on a flag for the first time
    fn on_flag_found(&mut self, flag: Position, discovered: usize, total: usize);

    /// Called once, when the final destination has been derived from the flags
    fn on_destination_computed(&mut self, flags: &[Position], destination: Position);

    /// Called when a move is selected, before it is executed
    fn on_move_selected(&mut self, _planned: &PlannedMove, _agent: &AgentState) {
        // Default implementation does nothing
    }

    /// Called when the mission finishes, successfully or not
    fn on_mission_finished(
        &mut self,
        result: &Result<MissionReport, MissionError>,
        agent: &AgentState,
    );
}
