use serde::Serialize;

use crate::{Board, Piece};

use super::{game_stats::GameStats, session::SessionState};

/// Point-in-time view of a session, for renderers and reports.
///
/// The board serializes as rows of text (`.` for empty cells, the kind
/// letter otherwise) and the active piece with its shape matrix and
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub score: u64,
    pub drop_interval_ms: u64,
    pub board: Board,
    pub active_piece: Option<Piece>,
    pub stats: GameStats,
}
