use std::fs;

use dotenv::dotenv;
use flagrunner::infra::{CompositeObserver, DefaultObserver, MissionLogObserver};
use flagrunner::{Maze, Mission, MissionConfig, MissionObserver, SimulatedRobot};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_FILTER: &str = "flagrunner=debug,info";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn load_maze(config: &MissionConfig) -> Result<Maze, Box<dyn std::error::Error>> {
    match &config.maze_file {
        Some(path) => {
            tracing::info!("Loading maze from {}", path);
            Ok(Maze::parse(&fs::read_to_string(path)?)?)
        }
        None => {
            tracing::info!("Generating maze with seed {}", config.seed);
            Ok(Maze::generate(flagrunner::state::MAZE_SIZE, config.seed))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let config = MissionConfig::from_env()?;
    let maze = load_maze(&config)?;
    let maze_size = maze.size();

    let mut observers: Vec<Box<dyn MissionObserver>> = vec![Box::new(DefaultObserver)];
    if let Some(folder) = &config.log_folder {
        let log = MissionLogObserver::create(folder)?;
        if let Some(path) = log.path() {
            tracing::info!("Writing mission log to {}", path.display());
        }
        observers.push(Box::new(log));
    }

    let mut mission = Mission::new(
        SimulatedRobot::new(maze),
        &config.flags,
        CompositeObserver::new(observers),
    )
    .with_maze_size(maze_size);
    if let Some(max_steps) = config.max_steps {
        mission = mission.with_max_steps(max_steps);
    }

    let result = mission.run();

    let markers: Vec<_> = mission
        .destination()
        .map(|destination| (destination, 'X'))
        .into_iter()
        .collect();
    println!("{}", mission.map().draw_ascii_map(mission.agent().position, &markers));

    result?;
    Ok(())
}
