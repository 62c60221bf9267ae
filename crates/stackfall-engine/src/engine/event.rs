use serde::Serialize;

use crate::PieceKind;

/// Notification queued by a session for its collaborators.
///
/// Events accumulate on the session until drained with
/// [`GameSession::take_events`](crate::GameSession::take_events). A renderer
/// typically redraws the score on [`ScoreChanged`](Self::ScoreChanged) and
/// shows an overlay on [`PauseChanged`](Self::PauseChanged) or
/// [`GameOver`](Self::GameOver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    ScoreChanged { score: u64 },
    PauseChanged { paused: bool },
    GameOver { final_score: u64 },
    PieceLocked { kind: PieceKind, cleared_rows: usize },
    PieceSpawned { kind: PieceKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(SessionEvent::PieceLocked {
            kind: PieceKind::T,
            cleared_rows: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "piece_locked", "kind": "T", "cleared_rows": 2 })
        );

        let json = serde_json::to_value(SessionEvent::GameOver { final_score: 70 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "game_over", "final_score": 70 })
        );
    }
}
