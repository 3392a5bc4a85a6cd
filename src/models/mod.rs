//! Data structures for an open-play session: tickets, waiting line, courts, results.

mod court;
mod match_result;
mod registry;
mod session;
mod settings;
mod ticket;
mod waiting_line;

pub use court::{Court, CourtId, CourtState, Pairing, Score, Team, TeamSide, GROUP_SIZE, TEAM_SIZE};
pub use match_result::{MatchResult, MatchWinner};
pub use registry::{MatchHistory, PlayerRecord, PlayerRegistry, ResultSink};
pub(crate) use session::validate_court_count;
pub use session::{Session, SessionError, SessionId, SessionState};
pub use settings::{
    JoinPosition, RotationPolicy, SelectionStrategy, SessionSettings, TeamSplit, UnknownVariant,
    MAX_COURTS, MIN_COURTS,
};
pub use ticket::{PlayerTicket, SkillTier};
pub use waiting_line::WaitingLine;
