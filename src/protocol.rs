//! Wire protocol for the relay: one JSON object per WebSocket text frame,
//! discriminated by a kebab-case `type` tag.

use serde::{Deserialize, Serialize};

use crate::game::{Board, Mark, Scores};

/// Messages a client may send.
///
/// Unknown fields are ignored, so a `restart-session` carrying the legacy
/// `startingMark` hint deserializes fine; the registry derives the starter
/// from `last_starter` and never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    CreateSession { code: String },
    JoinSession { code: String },
    MakeMove { code: String, index: usize, mark: Mark },
    RestartSession { code: String },
    EndSession { code: String },
}

/// Messages the server pushes to both participants of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    GameStart { current_player: Mark },
    #[serde(rename_all = "camelCase")]
    MoveApplied {
        index: usize,
        mark: Mark,
        current_player: Mark,
        board: Board,
        scores: Scores,
    },
    #[serde(rename_all = "camelCase")]
    GameRestarted { current_player: Mark, scores: Scores },
}

impl ServerMessage {
    /// Encode to a JSON text frame. Serialization of these types cannot
    /// fail, so a defaulted empty string never actually escapes.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
