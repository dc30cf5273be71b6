use crate::infra::{MissionObserver, Position};
use crate::mission::{MissionError, MissionReport, StepContext};
use crate::planners::PlannedMove;
use crate::state::{AgentState, FlagSet};

pub struct CompositeObserver {
    observers: Vec<Box<dyn MissionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Box<dyn MissionObserver>>) -> Self {
        Self { observers }
    }
}

impl MissionObserver for CompositeObserver {
    fn on_mission_start(&mut self, agent: &AgentState, flags: &FlagSet, maze_size: i32) {
        for observer in &mut self.observers {
            observer.on_mission_start(agent, flags, maze_size);
        }
    }

    fn on_step(&mut self, context: &StepContext) {
        for observer in &mut self.observers {
            observer.on_step(context);
        }
    }

    fn on_flag_found(&mut self, flag: Position, discovered: usize, total: usize) {
        for observer in &mut self.observers {
            observer.on_flag_found(flag, discovered, total);
        }
    }

    fn on_destination_computed(&mut self, flags: &[Position], destination: Position) {
        for observer in &mut self.observers {
            observer.on_destination_computed(flags, destination);
        }
    }

    fn on_move_selected(&mut self, planned: &PlannedMove, agent: &AgentState) {
        for observer in &mut self.observers {
            observer.on_move_selected(planned, agent);
        }
    }

    fn on_mission_finished(
        &mut self,
        result: &Result<MissionReport, MissionError>,
        agent: &AgentState,
    ) {
        for observer in &mut self.observers {
            observer.on_mission_finished(result, agent);
        }
    }
}
