pub mod athlete;
pub mod input;
pub mod race;
pub mod result;

pub use athlete::{AthleteRecord, BestResult};
pub use input::{RaceListing, ResultRow, RosterEntry};
pub use race::{rank_points, RaceStatus, RaceTable};
pub use result::{RaceKind, RaceResult, ResultId, ResultStore, Sex, MARATHON_KM};
