//! In-memory session registry: the sole owner of the code → session map.
//!
//! Every mutation goes through an operation on [`SessionRegistry`]; the raw
//! map is never exposed. `DashMap` holds the entry's shard lock for the full
//! read-modify-write, so operations on one session never interleave.
//!
//! Protocol-level failures (unknown code, full session, out-of-range cell)
//! degrade to "no visible effect": nothing is broadcast, the connection
//! stays open, and the drop is logged at debug level.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::game::{Board, Mark, Scores};
use crate::protocol::ServerMessage;

/// Commands delivered to a connection's send task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A JSON text frame to forward to the client.
    Frame(String),
    /// Close the WebSocket and stop the send task.
    Close,
}

/// Outbound channel handle for one connection.
pub type WsTx = mpsc::UnboundedSender<Outbound>;

/// One end of a relayed session: the connection's id (assigned at accept
/// time, used to find its sessions on disconnect) plus its outbound channel.
/// The transport layer owns the socket itself.
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: Uuid,
    pub tx: WsTx,
}

/// Live state of one two-player session.
#[derive(Debug)]
struct Session {
    /// Creator in slot 0; slot 1 stays empty until a second client joins.
    participants: [Option<Participant>; 2],
    board: Board,
    current_player: Mark,
    move_count: u8,
    last_starter: Mark,
    scores: Scores,
}

impl Session {
    fn new(creator: Participant) -> Self {
        Self {
            participants: [Some(creator), None],
            board: Board::default(),
            current_player: Mark::X,
            move_count: 0,
            last_starter: Mark::X,
            scores: Scores::default(),
        }
    }

    fn is_full(&self) -> bool {
        self.participants.iter().all(Option::is_some)
    }

    fn has_participant(&self, id: Uuid) -> bool {
        self.participants
            .iter()
            .flatten()
            .any(|participant| participant.id == id)
    }

    /// Push a message to every attached participant. Delivery is
    /// fire-and-forget; a gone receiver is ignored.
    fn broadcast(&self, message: &ServerMessage) {
        let encoded = message.encode();
        for participant in self.participants.iter().flatten() {
            let _ = participant.tx.send(Outbound::Frame(encoded.clone()));
        }
    }

    /// Ask every attached participant's send task to close its socket.
    fn close_all(&self) {
        for participant in self.participants.iter().flatten() {
            let _ = participant.tx.send(Outbound::Close);
        }
    }
}

/// What an accepted move did to the game, for callers that care (tests,
/// logging). Both participants learn the same thing from the broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Mark that completed a winning line with this move, if any.
    pub winner: Option<Mark>,
    /// Board filled up with no winner.
    pub draw: bool,
}

/// Tracks all live sessions across all connections.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Register a fresh session under `code` with `creator` as the first
    /// participant. A code that already maps to a live session is left
    /// untouched; the caller picked a colliding code and gets nothing.
    pub fn create(&self, code: &str, creator: Participant) {
        match self.sessions.entry(code.to_string()) {
            Entry::Occupied(_) => {
                tracing::debug!(code, "create dropped: code already live");
            }
            Entry::Vacant(entry) => {
                entry.insert(Session::new(creator));
                tracing::info!(code, "session created");
            }
        }
    }

    /// Attach `participant` as the second player and tell both sides the
    /// game has started. Unknown codes and already-full sessions are
    /// silently dropped.
    pub fn join(&self, code: &str, participant: Participant) {
        let Some(mut session) = self.sessions.get_mut(code) else {
            tracing::debug!(code, "join dropped: no such session");
            return;
        };
        if session.is_full() {
            tracing::debug!(code, "join dropped: session already has two participants");
            return;
        }
        session.participants[1] = Some(participant);
        session.broadcast(&ServerMessage::GameStart {
            current_player: Mark::X,
        });
        tracing::info!(code, "session active");
    }

    /// Write `mark` into the cell at `index`, flip the turn, run winner
    /// detection, and broadcast the updated state to both participants.
    ///
    /// The client-declared mark and cell are trusted as-is: neither turn
    /// ownership nor cell occupancy is checked here. Move legality is the
    /// clients' concern; the relay records whatever they declare. An
    /// out-of-range index is the one thing that cannot be honored and is
    /// dropped.
    pub fn apply_move(&self, code: &str, index: usize, mark: Mark) -> Option<MoveOutcome> {
        let Some(mut session) = self.sessions.get_mut(code) else {
            tracing::debug!(code, "move dropped: no such session");
            return None;
        };
        if !session.board.set(index, mark) {
            tracing::debug!(code, index, "move dropped: cell index out of range");
            return None;
        }
        session.move_count += 1;
        session.current_player = session.current_player.other();

        let winner = session.board.winner();
        if let Some(winner) = winner {
            session.scores.record_win(winner);
        }
        let outcome = MoveOutcome {
            winner,
            draw: winner.is_none() && usize::from(session.move_count) == Board::CELLS,
        };

        session.broadcast(&ServerMessage::MoveApplied {
            index,
            mark,
            current_player: session.current_player,
            board: session.board,
            scores: session.scores,
        });
        Some(outcome)
    }

    /// Clear the board for a new round. The mark that did NOT start the
    /// previous round starts this one; scores carry over untouched. Returns
    /// the new starter, or `None` if the code is unknown.
    pub fn restart(&self, code: &str) -> Option<Mark> {
        let Some(mut session) = self.sessions.get_mut(code) else {
            tracing::debug!(code, "restart dropped: no such session");
            return None;
        };
        let starter = session.last_starter.other();
        session.board.clear();
        session.move_count = 0;
        session.current_player = starter;
        session.last_starter = starter;

        session.broadcast(&ServerMessage::GameRestarted {
            current_player: starter,
            scores: session.scores,
        });
        tracing::info!(code, starter = starter.as_str(), "session restarted");
        Some(starter)
    }

    /// Tear down the session under `code`: both participants' sockets are
    /// closed and the code becomes reusable. Idempotent.
    pub fn end(&self, code: &str) {
        if let Some((_, session)) = self.sessions.remove(code) {
            session.close_all();
            tracing::info!(code, "session ended");
        }
    }

    /// Tear down every session the given connection participates in. Called
    /// on transport-level disconnect, so no session outlives either of its
    /// participants' connections.
    pub fn remove_for_connection(&self, id: Uuid) {
        self.sessions.retain(|code, session| {
            if session.has_participant(id) {
                session.close_all();
                tracing::info!(code = %code, "session removed after disconnect");
                false
            } else {
                true
            }
        });
    }

    /// Whether a live session exists under `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.sessions.contains_key(code)
    }
}
