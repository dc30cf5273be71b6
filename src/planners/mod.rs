mod flood_fill;
mod navigation;
mod target;

pub use flood_fill::{CostField, FloodFill, FloodGoal, UNREACHABLE};
pub use navigation::{Navigator, PlannedMove, Rotation};
pub use target::{DESTINATION_MODULUS, resolve_destination};
