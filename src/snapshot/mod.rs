pub mod storage;
pub mod template;
pub mod types;
pub mod validation;

pub use storage::{load_snapshot, save_snapshot};
pub use template::{
    new_snapshot, TemplateOptions, DEFAULT_PARTICIPANTS_PER_TEAM, MAX_PARTICIPANTS_PER_TEAM,
};
pub use types::{
    CombinedSetup, CombinedTeamSetup, Competition, CompetitionMode, Entry, IndividualSetup,
    RosterParticipant, SlotEntry, Snapshot, TeamSetup, SNAPSHOT_VERSION,
};
pub use validation::{score_warnings, validate_snapshot};
