use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use futures_util::{SinkExt, StreamExt};
use uuid::Uuid;

use crate::protocol::ClientMessage;
use crate::registry::{Outbound, Participant, WsTx};
use crate::state::AppState;
use crate::utils::{is_valid_session_code, normalize_session_code};

/// Build the relay route group: `GET /ws`.
pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_upgrade))
}

/// `GET /ws` — upgrade to `WebSocket`. Every accepted socket gets a fresh
/// connection id, used on disconnect to find the sessions it belongs to.
async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let connection_id = Uuid::new_v4();
    ws.on_upgrade(move |socket| handle_connection(state, connection_id, socket))
}

/// Drive a single client connection: spawn a send task fed by the session
/// registry, dispatch inbound frames, and tear down the connection's
/// sessions when the transport closes.
async fn handle_connection(state: AppState, connection_id: Uuid, socket: WebSocket) {
    let (mut ws_sink, mut ws_stream) = socket.split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Outbound>();

    tracing::debug!(%connection_id, "client connected");

    // Forward registry output to the socket until the peer is gone or the
    // registry asks for an explicit close (session ended).
    let send_task = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            match command {
                Outbound::Frame(text) => {
                    if ws_sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Outbound::Close => {
                    let _ = ws_sink.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    // Process inbound messages
    while let Some(Ok(message)) = ws_stream.next().await {
        match message {
            Message::Text(text) => {
                dispatch(&state, connection_id, &tx, &text);
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    // Disconnect is a lifecycle event, not an error: any session this
    // connection participates in dies with it.
    state.registry.remove_for_connection(connection_id);
    send_task.abort();
    tracing::debug!(%connection_id, "client disconnected");
}

/// Parse one inbound frame and dispatch it to the registry. Malformed frames
/// are dropped; the connection stays open either way.
fn dispatch(state: &AppState, connection_id: Uuid, tx: &WsTx, text: &str) {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(err) => {
            tracing::debug!(%connection_id, %err, "dropping malformed message");
            return;
        }
    };

    match message {
        ClientMessage::CreateSession { code } => {
            let code = normalize_session_code(&code);
            if !is_valid_session_code(code) {
                tracing::debug!(%connection_id, code, "dropping create with malformed code");
                return;
            }
            state.registry.create(
                code,
                Participant {
                    id: connection_id,
                    tx: tx.clone(),
                },
            );
        }
        ClientMessage::JoinSession { code } => {
            state.registry.join(
                normalize_session_code(&code),
                Participant {
                    id: connection_id,
                    tx: tx.clone(),
                },
            );
        }
        ClientMessage::MakeMove { code, index, mark } => {
            state
                .registry
                .apply_move(normalize_session_code(&code), index, mark);
        }
        ClientMessage::RestartSession { code } => {
            state.registry.restart(normalize_session_code(&code));
        }
        ClientMessage::EndSession { code } => {
            state.registry.end(normalize_session_code(&code));
        }
    }
}
