//! Court rotation web app: library with models and rotation logic.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod persistence;

pub use logic::{
    add_player, auto_fill_empty_courts, fill_opponents, finish_match, is_safe_group, pick_four,
    rematch, remove_player, reset_session, shuffle_teams, start_match, start_session, submit_score,
    swap_player, update_score, Finish, RotationPlan,
};
pub use models::{
    Court, CourtId, CourtState, JoinPosition, MatchHistory, MatchResult, MatchWinner, Pairing,
    PlayerRecord, PlayerRegistry, PlayerTicket, ResultSink, RotationPolicy, Score,
    SelectionStrategy, Session, SessionError, SessionId, SessionSettings, SessionState, SkillTier,
    Team, TeamSide, TeamSplit, WaitingLine, GROUP_SIZE, TEAM_SIZE,
};
