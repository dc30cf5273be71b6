use tracing::{debug, info, trace, warn};

use crate::infra::{MissionObserver, Position};
use crate::mission::{MissionError, MissionReport, StepContext};
use crate::planners::{PlannedMove, UNREACHABLE};
use crate::state::{AgentState, FlagSet};

pub struct DefaultObserver;

impl MissionObserver for DefaultObserver {
    fn on_mission_start(&mut self, agent: &AgentState, flags: &FlagSet, maze_size: i32) {
        info!("Mission started at {} facing {:?}", agent.position, agent.heading);
        info!("- maze size: {}x{}", maze_size, maze_size);
        info!("- flags: {:?}", flags.positions());
    }

    fn on_step(&mut self, context: &StepContext) {
        if context.cost == UNREACHABLE {
            debug!(
                "step: {}, phase: {:?}, pos: {}, cost: unreachable",
                context.step, context.phase, context.agent.position
            );
        } else {
            debug!(
                "step: {}, phase: {:?}, pos: {}, cost: {}",
                context.step, context.phase, context.agent.position, context.cost
            );
        }
        trace!("\n{}", context.draw_ascii_map());
    }

    fn on_flag_found(&mut self, flag: Position, discovered: usize, total: usize) {
        info!("Found flag at {} ({}/{})", flag, discovered, total);
    }

    fn on_destination_computed(&mut self, flags: &[Position], destination: Position) {
        let sum_x: i32 = flags.iter().map(|flag| flag.x).sum();
        let sum_y: i32 = flags.iter().map(|flag| flag.y).sum();
        info!("All flags found, flag sums: x = {}, y = {}", sum_x, sum_y);
        info!("Final destination: {}", destination);
    }

    fn on_move_selected(&mut self, planned: &PlannedMove, _agent: &AgentState) {
        trace!("move: {:?} ({:?})", planned.direction, planned.rotation);
    }

    fn on_mission_finished(
        &mut self,
        result: &Result<MissionReport, MissionError>,
        agent: &AgentState,
    ) {
        match result {
            Ok(report) => {
                info!("Reached final destination {}", report.destination);
                info!(
                    "Mission complete: {} steps, {} moves, {} turns",
                    report.steps, report.moves, report.turns
                );
            }
            Err(error) => {
                warn!("Mission failed at {}: {}", agent.position, error);
            }
        }
    }
}
