use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use time::{OffsetDateTime, format_description};
use tracing::warn;

use crate::infra::{MissionObserver, Position};
use crate::mission::{MissionError, MissionReport, StepContext};
use crate::state::{AgentState, FlagSet};

/// Writes mission milestones as `[<seconds>s] <message>` lines, with the
/// elapsed time measured from the observer's creation.
pub struct MissionLogObserver {
    writer: Box<dyn Write>,
    started: Instant,
    path: Option<PathBuf>,
}

impl MissionLogObserver {
    pub fn new(writer: impl Write + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            started: Instant::now(),
            path: None,
        }
    }

    /// Creates `mission_log-<timestamp>.txt` inside `folder`.
    pub fn create(folder: &str) -> io::Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description::parse("[year][month][day]-[hour][minute][second]")
            .map_err(io::Error::other)?;
        let date_time_str = now.format(&format).map_err(io::Error::other)?;

        let filename = Path::new(folder).join(format!("mission_log-{}.txt", date_time_str));
        if let Some(parent) = filename.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&filename)?;
        let mut observer = Self::new(BufWriter::new(file));
        observer.path = Some(filename);
        Ok(observer)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn log(&mut self, message: &str) {
        let elapsed = self.started.elapsed().as_secs_f64();
        let written = writeln!(self.writer, "[{:.3}s] {}", elapsed, message)
            .and_then(|_| self.writer.flush());
        if let Err(error) = written {
            warn!("Could not write mission log: {}", error);
        }
    }
}

impl MissionObserver for MissionLogObserver {
    fn on_mission_start(&mut self, agent: &AgentState, flags: &FlagSet, _maze_size: i32) {
        self.log(&format!(
            "Mission start at {}, {} flags to find",
            agent.position,
            flags.len()
        ));
    }

    fn on_step(&mut self, _context: &StepContext) {}

    fn on_flag_found(&mut self, flag: Position, discovered: usize, total: usize) {
        self.log(&format!("Flag found at {} ({}/{})", flag, discovered, total));
    }

    fn on_destination_computed(&mut self, flags: &[Position], destination: Position) {
        let sum_x: i32 = flags.iter().map(|flag| flag.x).sum();
        let sum_y: i32 = flags.iter().map(|flag| flag.y).sum();
        self.log(&format!(
            "All flags found, sum x: {} | sum y: {} -> destination {}",
            sum_x, sum_y, destination
        ));
    }

    fn on_mission_finished(
        &mut self,
        result: &Result<MissionReport, MissionError>,
        agent: &AgentState,
    ) {
        match result {
            Ok(report) => self.log(&format!(
                "Mission complete at {} after {} steps",
                report.destination, report.steps
            )),
            Err(error) => self.log(&format!("Mission failed at {}: {}", agent.position, error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::infra::Direction;
    use crate::mission::MissionPhase;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.borrow().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn test_milestones_are_timestamped() {
        let buffer = SharedBuffer::default();
        let mut observer = MissionLogObserver::new(buffer.clone());
        let agent = AgentState::default();
        let flags = FlagSet::new(&[Position::new(7, 7), Position::new(0, 7), Position::new(9, 15)]);

        observer.on_mission_start(&agent, &flags, 16);
        observer.on_flag_found(Position::new(0, 7), 1, 3);
        observer.on_destination_computed(&flags.positions(), Position::new(4, 5));
        observer.on_mission_finished(
            &Err(MissionError::UnreachableGoal {
                phase: MissionPhase::Exploring,
                position: Position::new(2, 2),
            }),
            &AgentState::new(Position::new(2, 2), Direction::East),
        );

        let lines = buffer.lines();
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert!(line.starts_with('['), "{}", line);
            assert!(line.contains("s] "), "{}", line);
        }
        assert!(lines[0].ends_with("Mission start at (0, 0), 3 flags to find"));
        assert!(lines[1].ends_with("Flag found at (0, 7) (1/3)"));
        assert!(lines[2].ends_with("sum x: 16 | sum y: 29 -> destination (4, 5)"));
        assert!(lines[3].contains("Mission failed at (2, 2)"));
    }

    #[test]
    fn test_success_line() {
        let buffer = SharedBuffer::default();
        let mut observer = MissionLogObserver::new(buffer.clone());
        let report = MissionReport {
            destination: Position::new(4, 5),
            steps: 120,
            moves: 110,
            turns: 60,
        };

        let agent = AgentState::new(Position::new(4, 5), Direction::North);
        observer.on_mission_finished(&Ok(report), &agent);
        assert!(buffer.lines()[0].ends_with("Mission complete at (4, 5) after 120 steps"));
    }

    #[test]
    fn test_create_writes_into_folder() {
        let folder = std::env::temp_dir().join(format!("flagrunner-log-{}", std::process::id()));
        let folder_str = folder.to_string_lossy().to_string();

        let mut observer = MissionLogObserver::create(&folder_str).unwrap();
        observer.on_flag_found(Position::new(1, 1), 1, 1);
        let path = observer.path().unwrap().to_path_buf();
        drop(observer);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Flag found at (1, 1) (1/1)"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("mission_log-") && name.ends_with(".txt"));

        std::fs::remove_dir_all(&folder).unwrap();
    }
}
