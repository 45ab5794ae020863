//! HTTP and WebSocket transport.
//!
//! - `GET /rooms`: directory of live rooms as `[[name, players, max], ...]`
//! - `GET /ws`: WebSocket; every text frame is one protocol message and the
//!   first client frame must be `uid`
//! - `GET /health`: liveness

use crate::config::ServerConfig;
use crate::handler::ConnectionHandler;
use crate::state::ServerState;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::{Json, Response};
use axum::routing::get;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use inarow_board::{ClientMessage, RoomSummary};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `"ok"`.
    pub status: String,
    /// Live rooms.
    pub rooms: usize,
    /// Known participants.
    pub participants: usize,
}

/// Builds the router for `state`.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/health", get(health))
        .route("/ws", get(upgrade))
        .with_state(state)
}

/// Binds `config`'s address and serves until the process stops.
#[instrument(skip(config))]
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Server ready");
    serve_on(listener, ServerState::new(config)).await
}

/// Serves `state` on an already bound listener.
pub async fn serve_on(listener: TcpListener, state: ServerState) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[instrument(skip(state))]
async fn list_rooms(State(state): State<ServerState>) -> Json<Vec<RoomSummary>> {
    let directory = state.rooms().directory();
    debug!(rooms = directory.len(), "Directory requested");
    Json(directory)
}

async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        rooms: state.rooms().len(),
        participants: state.connections().len(),
    })
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<ServerState>) -> Response {
    ws.on_upgrade(move |socket| run_socket(socket, state))
}

#[instrument(skip_all)]
async fn run_socket(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();

    let uid = match next_message(&mut stream).await {
        Some(ClientMessage::Uid(uid)) => uid,
        Some(other) => {
            warn!(event = other.name(), "First frame was not a uid handshake");
            return;
        }
        None => {
            debug!("Socket closed before handshake");
            return;
        }
    };

    let (sender, mut outbound) = mpsc::unbounded_channel();
    let handler = ConnectionHandler::attach(state, &uid, sender);

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let text = match message.encode() {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to encode message");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!("Socket write failed");
                break;
            }
        }
    });

    while let Some(message) = next_message(&mut stream).await {
        handler.handle(message);
    }

    writer.abort();
    let _expiry = handler.disconnected();
}

/// Next decodable protocol message, skipping malformed and non-text frames.
/// `None` once the socket closes.
async fn next_message(stream: &mut SplitStream<WebSocket>) -> Option<ClientMessage> {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match ClientMessage::decode(text.as_str()) {
                Ok(message) => return Some(message),
                Err(e) => warn!(error = %e, "Malformed client message"),
            },
            Ok(Message::Close(_)) => return None,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "Socket read failed");
                return None;
            }
        }
    }
    None
}
