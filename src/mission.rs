use std::error::Error;
use std::fmt;

use tracing::debug;

use crate::infra::{Color, MissionObserver, Position, Robot};
use crate::planners::{
    CostField, FloodFill, FloodGoal, Navigator, PlannedMove, Rotation, UNREACHABLE,
    resolve_destination,
};
use crate::state::{AgentState, FlagSet, KnowledgeMap, MAZE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MissionPhase {
    Exploring,
    FinalRun,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    /// No known path from the agent's cell to the current goal.
    UnreachableGoal {
        phase: MissionPhase,
        position: Position,
    },
    /// Every direction out of the agent's cell is walled or off the grid.
    NoMoveAvailable { position: Position },
    StepLimitExceeded { steps: u32 },
}

impl fmt::Display for MissionError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MissionError::UnreachableGoal {
                phase: MissionPhase::Exploring,
                position,
            } => write!(
                formatter,
                "Maze explored from {} but flags remain unreachable",
                position
            ),
            MissionError::UnreachableGoal { phase, position } => {
                write!(formatter, "Goal unreachable from {} during {:?}", position, phase)
            }
            MissionError::NoMoveAvailable { position } => {
                write!(formatter, "No open direction out of {}", position)
            }
            MissionError::StepLimitExceeded { steps } => {
                write!(formatter, "Mission aborted after {} steps", steps)
            }
        }
    }
}

impl Error for MissionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionReport {
    pub destination: Position,
    pub steps: u32,
    pub moves: u32,
    pub turns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(PlannedMove),
    PhaseChanged(MissionPhase),
    Finished,
}

/// Read-only view of one step, handed to observers.
pub struct StepContext<'a> {
    pub step: u32,
    pub phase: MissionPhase,
    pub agent: &'a AgentState,
    pub map: &'a KnowledgeMap,
    pub flags: &'a FlagSet,
    pub destination: Option<Position>,
    /// Cost of the agent's cell under this step's cost field.
    pub cost: u16,
}

impl StepContext<'_> {
    pub fn draw_ascii_map(&self) -> String {
        let mut markers: Vec<(Position, char)> = self
            .flags
            .iter()
            .map(|flag| (flag.position, if flag.discovered { 'f' } else { 'F' }))
            .collect();
        if let Some(destination) = self.destination {
            markers.insert(0, (destination, 'X'));
        }
        self.map.draw_ascii_map(self.agent.position, &markers)
    }
}

/// One navigation session: the knowledge map, agent, flags and phase are
/// owned here and only change between steps.
pub struct Mission<R: Robot> {
    robot: R,
    observer: Box<dyn MissionObserver>,
    map: KnowledgeMap,
    agent: AgentState,
    flags: FlagSet,
    phase: MissionPhase,
    destination: Option<Position>,
    max_steps: u32,
    steps: u32,
    moves: u32,
    turns: u32,
}

impl<R: Robot> Mission<R> {
    pub fn new(robot: R, flags: &[Position], observer: impl MissionObserver + 'static) -> Self {
        Self {
            robot,
            observer: Box::new(observer),
            map: KnowledgeMap::new(MAZE_SIZE),
            agent: AgentState::default(),
            flags: FlagSet::new(flags),
            phase: MissionPhase::Exploring,
            destination: None,
            max_steps: default_step_limit(MAZE_SIZE),
            steps: 0,
            moves: 0,
            turns: 0,
        }
    }

    /// Resizes the knowledge map and resets the step limit to match.
    pub fn with_maze_size(mut self, size: i32) -> Self {
        self.map = KnowledgeMap::new(size);
        self.max_steps = default_step_limit(self.map.size());
        self
    }

    pub fn with_start(mut self, agent: AgentState) -> Self {
        self.agent = agent;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    pub fn map(&self) -> &KnowledgeMap {
        &self.map
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn robot(&self) -> &R {
        &self.robot
    }

    /// Drives the mission to completion.
    pub fn run(&mut self) -> Result<MissionReport, MissionError> {
        self.start();
        let result = self.drive();
        self.observer.on_mission_finished(&result, &self.agent);
        result
    }

    fn start(&mut self) {
        let start = self.agent.position;
        self.map.mark_visited(&start);

        self.robot.set_color(start, Color::Green);
        self.robot.set_text(start, "START");
        for flag in self.flags.positions() {
            self.robot.set_color(flag, Color::Green);
        }

        self.observer.on_mission_start(&self.agent, &self.flags, self.map.size());
    }

    fn drive(&mut self) -> Result<MissionReport, MissionError> {
        loop {
            if self.steps >= self.max_steps {
                return Err(MissionError::StepLimitExceeded { steps: self.steps });
            }
            if let StepOutcome::Finished = self.step()? {
                return Ok(self.report());
            }
        }
    }

    fn report(&self) -> MissionReport {
        MissionReport {
            destination: self.destination.unwrap_or(self.agent.position),
            steps: self.steps,
            moves: self.moves,
            turns: self.turns,
        }
    }

    /// Runs one sense, plan, act iteration.
    pub fn step(&mut self) -> Result<StepOutcome, MissionError> {
        let goal = match (self.phase, self.destination) {
            (MissionPhase::Done, _) => return Ok(StepOutcome::Finished),
            (MissionPhase::FinalRun, Some(destination)) => FloodGoal::Destination(destination),
            _ => FloodGoal::Frontier,
        };
        self.steps += 1;

        let position = self.agent.position;
        let front = self.robot.wall_front();
        let left = self.robot.wall_left();
        let right = self.robot.wall_right();
        self.map.observe(position, self.agent.heading, front, left, right);

        let costs = FloodFill::compute(&self.map, goal);
        let cost = costs.get(&position);
        self.observer.on_step(&StepContext {
            step: self.steps,
            phase: self.phase,
            agent: &self.agent,
            map: &self.map,
            flags: &self.flags,
            destination: self.destination,
            cost,
        });

        let flags_remaining = !self.flags.all_discovered();
        if cost == UNREACHABLE && (flags_remaining || self.phase == MissionPhase::FinalRun) {
            return Err(MissionError::UnreachableGoal {
                phase: self.phase,
                position,
            });
        }
        self.robot.set_text(position, &cost_label(cost));

        for found in self.flags.discover_at(position) {
            self.robot.set_color(found, Color::Blue);
            self.robot.set_text(found, "FOUND");
            self.observer.on_flag_found(
                found,
                self.flags.discovered_count(),
                self.flags.len(),
            );
        }

        if self.phase == MissionPhase::Exploring && self.flags.all_discovered() {
            let flags = self.flags.positions();
            let destination = resolve_destination(&flags);
            self.destination = Some(destination);
            self.phase = MissionPhase::FinalRun;

            self.robot.set_color(destination, Color::Red);
            self.robot.set_text(destination, "FINAL");
            self.observer.on_destination_computed(&flags, destination);
            return Ok(StepOutcome::PhaseChanged(MissionPhase::FinalRun));
        }

        if self.phase == MissionPhase::FinalRun && cost == 0 {
            self.phase = MissionPhase::Done;
            self.robot.set_color(position, Color::Red);
            self.robot.set_text(position, "WIN");
            return Ok(StepOutcome::Finished);
        }

        let planned = self.plan(&costs)?;
        self.execute(planned);
        Ok(StepOutcome::Moved(planned))
    }

    fn plan(&self, costs: &CostField) -> Result<PlannedMove, MissionError> {
        Navigator::plan(&self.map, costs, self.agent.position, self.agent.heading).ok_or(
            MissionError::NoMoveAvailable {
                position: self.agent.position,
            },
        )
    }

    fn execute(&mut self, planned: PlannedMove) {
        self.observer.on_move_selected(&planned, &self.agent);

        match planned.rotation {
            Rotation::Straight => {}
            Rotation::Right => self.robot.turn_right(),
            Rotation::Left => self.robot.turn_left(),
            Rotation::TurnAround => {
                self.robot.turn_right();
                self.robot.turn_right();
            }
        }
        self.robot.move_forward();

        self.turns += planned.rotation.turn_count();
        self.moves += 1;
        self.agent.advance(planned.direction);
        debug!(
            "Moved {:?} to {} (cost {})",
            planned.direction, self.agent.position, planned.cost
        );
    }
}

/// Upper bound on iterations: the number of cells squared.
pub fn default_step_limit(size: i32) -> u32 {
    let cells = (size.max(1) as u32).saturating_mul(size.max(1) as u32);
    cells.saturating_mul(cells)
}

fn cost_label(cost: u16) -> String {
    if cost == UNREACHABLE {
        "inf".to_string()
    } else {
        cost.to_string()
    }
}
